//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the lifecycle state machine. It has
//! **zero dependencies** on UI, randomness, or I/O, making it:
//!
//! - **Deterministic**: the same event sequence produces the same game
//! - **Testable**: every rule is exercised without a terminal or a clock
//! - **Portable**: it can run under any driver (terminal, headless, replay)
//!
//! # Module Structure
//!
//! - [`pieces`]: shape tables, rotation, and extent queries
//! - [`board`]: the fixated-cell set with row-completion clearing
//! - [`machine`]: the `Uninitialized -> Running -> (GameOver | Fault)` state
//!   machine consuming [`GameEvent`]s and emitting [`Command`]s
//! - [`scene`]: the read-only render feed
//!
//! # Event protocol
//!
//! The machine never draws randomness itself. It emits
//! [`Command::RequestPiece`] and the driver answers with
//! [`GameEvent::PieceReady`] as an ordinary queued event, so state processing
//! never blocks:
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::{Command, GameEvent, PieceKind};
//!
//! let (game, commands) = Game::boot();
//! assert_eq!(commands.len(), 2);
//!
//! // The driver fulfills both requests; the second delivery starts the game.
//! let game = game.handle(GameEvent::PieceReady(PieceKind::T)).game;
//! let game = game.handle(GameEvent::PieceReady(PieceKind::I)).game;
//! assert!(game.is_running());
//! ```
//!
//! [`GameEvent`]: blockfall_types::GameEvent
//! [`Command`]: blockfall_types::Command
//! [`Command::RequestPiece`]: blockfall_types::Command::RequestPiece
//! [`GameEvent::PieceReady`]: blockfall_types::GameEvent::PieceReady

pub mod board;
pub mod machine;
pub mod pieces;
pub mod scene;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use machine::{absolute_cells, collides, Commands, Game, GameState, NextSlot, Step};
pub use pieces::{rotation_count, shape, Piece};
pub use scene::{Scene, ScenePhase};

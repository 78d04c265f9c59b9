//! Engine crate - the driving harness around the core machine.
//!
//! The core state machine is pure; this crate supplies everything it
//! delegates outward:
//!
//! - [`PieceGenerator`]: uniform random draws answering `RequestPiece`
//! - [`TickClock`]: the gravity cadence, re-armed on fast-drop toggles
//! - [`Session`]: event queueing and command fulfillment in arrival order
//! - [`EngineConfig`]: environment-variable overrides

pub mod clock;
pub mod config;
pub mod generator;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::{tick_interval, TickClock};
pub use config::EngineConfig;
pub use generator::PieceGenerator;
pub use session::Session;

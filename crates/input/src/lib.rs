//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` key events into [`blockfall_types::GameEvent`]s. The
//! mapping is the whole job: repeat pacing and cadence live in the engine,
//! not here.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key_press, map_key_release, should_quit};

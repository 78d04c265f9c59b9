//! Terminal rendering for the game.
//!
//! A deliberately small pipeline: the core's [`Scene`] is projected into a
//! styled-character [`FrameBuffer`] by [`SceneView`] (pure, testable), and
//! [`TerminalRenderer`] flushes frames to the terminal. Everything the
//! renderer knows about the game arrives through the scene; it never touches
//! machine state.
//!
//! [`Scene`]: blockfall_core::Scene

pub mod fb;
pub mod renderer;
pub mod scene_view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use scene_view::{SceneView, Viewport};

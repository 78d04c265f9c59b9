//! Scene module - the read-only render feed
//!
//! A [`Scene`] is everything an observer needs for one frame, in abstract
//! board coordinates: the board outline, the falling piece's absolute cells,
//! the fixated cells, the preview pane cells, and the score. Translating
//! these into pixels or terminal glyphs is entirely the renderer's concern.

use arrayvec::ArrayVec;

use blockfall_types::{NUM_COLS, NUM_ROWS, PREVIEW_ORIGIN};

use crate::board::Cell;
use crate::machine::{absolute_cells, Game, NextSlot};

/// Lifecycle tag carried by a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenePhase {
    /// Boot pieces have not all arrived yet.
    Loading,
    Playing { fast_drop: bool },
    GameOver { score: u32 },
    Fault { message: String },
}

/// One frame's worth of observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Board outline geometry, fixed for the lifetime of the game.
    pub cols: u8,
    pub rows: u8,
    /// Absolute cells of the falling piece; empty outside the running phase.
    pub piece_cells: ArrayVec<Cell, 4>,
    /// Next piece's cells, offset into the side preview pane.
    pub preview_cells: ArrayVec<Cell, 4>,
    /// Fixated cells in deterministic `(col, row)` order.
    pub fixated: Vec<Cell>,
    pub score: u32,
    pub phase: ScenePhase,
}

impl Scene {
    fn empty(phase: ScenePhase, score: u32) -> Self {
        Self {
            cols: NUM_COLS,
            rows: NUM_ROWS,
            piece_cells: ArrayVec::new(),
            preview_cells: ArrayVec::new(),
            fixated: Vec::new(),
            score,
            phase,
        }
    }
}

impl Game {
    /// Project the current phase into a render feed frame.
    pub fn scene(&self) -> Scene {
        match self {
            Game::Uninitialized { .. } => Scene::empty(ScenePhase::Loading, 0),
            Game::GameOver { score } => {
                Scene::empty(ScenePhase::GameOver { score: *score }, *score)
            }
            Game::Fault { message } => Scene::empty(
                ScenePhase::Fault {
                    message: message.clone(),
                },
                0,
            ),
            Game::Running(state) => {
                let preview_cells = match state.next() {
                    NextSlot::Ready(piece) => absolute_cells(&piece, PREVIEW_ORIGIN),
                    NextSlot::Requested => ArrayVec::new(),
                };
                Scene {
                    cols: NUM_COLS,
                    rows: NUM_ROWS,
                    piece_cells: absolute_cells(&state.piece(), state.anchor()),
                    preview_cells,
                    fixated: state.board().cells().collect(),
                    score: state.score(),
                    phase: ScenePhase::Playing {
                        fast_drop: state.fast_drop(),
                    },
                }
            }
        }
    }
}

//! Pieces module - shape tables and rotation for the seven falling pieces
//!
//! Shapes are lookup tables of occupied cell offsets relative to the piece
//! anchor. Every rotation state is normalized so its offsets start at column 0
//! and row 0 of its own bounding box; the anchor is therefore always the
//! top-left corner of the occupied area.
//!
//! Rotation is a pure step to the next rotation index. Boundary handling
//! (right-edge clamping) is the state machine's job, not the shape table's.

use blockfall_types::PieceKind;

/// Offset of a single occupied cell relative to the piece anchor, `(col, row)`.
pub type CellOffset = (i8, i8);

/// Occupied cells of one rotation state - always four.
pub type PieceCells = [CellOffset; 4];

/// Number of distinct rotation states for a kind.
pub fn rotation_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::O => 1,
        PieceKind::I | PieceKind::S | PieceKind::Z => 2,
        PieceKind::T | PieceKind::J | PieceKind::L => 4,
    }
}

/// Occupied cell offsets for a kind at a rotation index.
///
/// The index is taken modulo [`rotation_count`], so callers may pass a
/// monotonically stepped value.
pub fn shape(kind: PieceKind, rotation: u8) -> PieceCells {
    let r = rotation % rotation_count(kind);
    match kind {
        PieceKind::I => match r {
            0 => [(0, 0), (1, 0), (2, 0), (3, 0)],
            _ => [(0, 0), (0, 1), (0, 2), (0, 3)],
        },
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => match r {
            0 => [(0, 0), (1, 0), (2, 0), (1, 1)],
            1 => [(1, 0), (0, 1), (1, 1), (1, 2)],
            2 => [(1, 0), (0, 1), (1, 1), (2, 1)],
            _ => [(0, 0), (0, 1), (1, 1), (0, 2)],
        },
        PieceKind::S => match r {
            0 => [(1, 0), (2, 0), (0, 1), (1, 1)],
            _ => [(0, 0), (0, 1), (1, 1), (1, 2)],
        },
        PieceKind::Z => match r {
            0 => [(0, 0), (1, 0), (1, 1), (2, 1)],
            _ => [(1, 0), (0, 1), (1, 1), (0, 2)],
        },
        PieceKind::J => match r {
            0 => [(0, 0), (0, 1), (1, 1), (2, 1)],
            1 => [(0, 0), (1, 0), (0, 1), (0, 2)],
            2 => [(0, 0), (1, 0), (2, 0), (2, 1)],
            _ => [(1, 0), (1, 1), (0, 2), (1, 2)],
        },
        PieceKind::L => match r {
            0 => [(2, 0), (0, 1), (1, 1), (2, 1)],
            1 => [(0, 0), (0, 1), (0, 2), (1, 2)],
            2 => [(0, 0), (1, 0), (2, 0), (0, 1)],
            _ => [(0, 0), (1, 0), (1, 1), (1, 2)],
        },
    }
}

/// A falling piece: a kind plus its current rotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
}

impl Piece {
    /// A fresh piece in its spawn orientation.
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, rotation: 0 }
    }

    /// The next rotation state. Pure; the caller decides whether it fits.
    pub fn rotated(self) -> Self {
        Self {
            rotation: (self.rotation + 1) % rotation_count(self.kind),
            ..self
        }
    }

    /// Occupied cell offsets at the current rotation.
    pub fn cells(&self) -> PieceCells {
        shape(self.kind, self.rotation)
    }

    /// Leftmost occupied column offset.
    pub fn leftmost(&self) -> i8 {
        self.cells().iter().map(|&(col, _)| col).fold(i8::MAX, i8::min)
    }

    /// Rightmost occupied column offset.
    pub fn rightmost(&self) -> i8 {
        self.cells().iter().map(|&(col, _)| col).fold(i8::MIN, i8::max)
    }
}

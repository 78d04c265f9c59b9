//! Uniform random piece source.
//!
//! Each draw is an independent uniform choice over the seven kinds; there is
//! deliberately no bag balancing. Seeding makes whole sessions reproducible.

use blockfall_types::PieceKind;

/// The piece source backing the machine's `RequestPiece` commands.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: fastrand::Rng,
}

impl PieceGenerator {
    /// A generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A deterministic generator for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Draw one piece kind uniformly.
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.usize(..PieceKind::ALL.len())]
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

//! Engine configuration from environment variables.

use std::time::Duration;

use blockfall_types::BASE_TICK_MS;

use crate::generator::PieceGenerator;

/// Runtime knobs, all optional.
///
/// - `BLOCKFALL_TICK_MS`: base tick interval in milliseconds (default 1000).
/// - `BLOCKFALL_SEED`: seed for the piece generator (default: entropy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub base_tick: Duration,
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let base_tick = std::env::var("BLOCKFALL_TICK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(BASE_TICK_MS));

        let seed = std::env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        Self { base_tick, seed }
    }

    /// Build the piece generator this configuration asks for.
    pub fn generator(&self) -> PieceGenerator {
        match self.seed {
            Some(seed) => PieceGenerator::seeded(seed),
            None => PieceGenerator::new(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_tick: Duration::from_millis(BASE_TICK_MS),
            seed: None,
        }
    }
}

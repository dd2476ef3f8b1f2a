//! Engine configuration read from the environment.

use crate::engine::GameEngine;
use crate::error::EngineError;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Board size and optional fixed seed for new games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Fixed seed for every new game; `None` draws a random seed per game
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read `BLOCKTRIS_BOARD_WIDTH`, `BLOCKTRIS_BOARD_HEIGHT` and `BLOCKTRIS_SEED`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let width = env::var("BLOCKTRIS_BOARD_WIDTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = env::var("BLOCKTRIS_BOARD_HEIGHT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);
        let seed = env::var("BLOCKTRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            width,
            height,
            seed,
        }
    }

    /// Start a new game with this configuration
    pub fn new_engine(&self) -> Result<GameEngine, EngineError> {
        match self.seed {
            Some(seed) => GameEngine::with_seed(self.width, self.height, seed),
            None => GameEngine::new(self.width, self.height),
        }
    }
}

//! Game parameters for the play use case loop.

use serde::{Deserialize, Serialize};
use sleuth_domain::DEFAULT_MAX_ROUNDS;

/// Parameters for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum number of question rounds.
    pub max_rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl GameConfig {
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }
}

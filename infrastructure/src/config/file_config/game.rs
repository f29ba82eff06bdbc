//! Game configuration from TOML (`[game]` section)

use serde::{Deserialize, Serialize};
use sleuth_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_MAX_ROUNDS};

/// Above this many rounds the prompts get long and the game drags.
const LARGE_ROUND_BUDGET: usize = 100;

/// Hard ceiling on the question budget.
const MAX_ROUND_BUDGET: usize = 1000;

/// Raw game configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Question budget per game
    pub max_rounds: usize,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl FileGameConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "game.max_rounds".to_string(),
                },
                "game.max_rounds must be at least 1",
            ));
        } else if self.max_rounds > MAX_ROUND_BUDGET {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::LargeValue {
                    field: "game.max_rounds".to_string(),
                    value: self.max_rounds,
                },
                format!(
                    "game.max_rounds = {} exceeds the limit of {}",
                    self.max_rounds, MAX_ROUND_BUDGET
                ),
            ));
        } else if self.max_rounds > LARGE_ROUND_BUDGET {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::LargeValue {
                    field: "game.max_rounds".to_string(),
                    value: self.max_rounds,
                },
                format!(
                    "game.max_rounds = {} is unusually large; every prompt replays the full history",
                    self.max_rounds
                ),
            ));
        }
        issues
    }
}

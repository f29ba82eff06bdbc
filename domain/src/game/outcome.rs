//! Game outcome value object

use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameOutcome {
    /// The player confirmed the oracle's guess.
    AiWon { title: String },
    /// The question budget ran out without a confirmed guess.
    PlayerWon { revealed: Option<String> },
    /// The player left mid-game.
    Aborted,
}

impl GameOutcome {
    /// Human-readable result, as written to transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            GameOutcome::AiWon { .. } => "AI Won",
            GameOutcome::PlayerWon { .. } => "Player Won",
            GameOutcome::Aborted => "Aborted",
        }
    }

    /// Movie title to record, or `unresolved` when nobody named one.
    pub fn movie(&self) -> &str {
        match self {
            GameOutcome::AiWon { title } => title,
            GameOutcome::PlayerWon {
                revealed: Some(title),
            } if !title.trim().is_empty() => title,
            _ => "unresolved",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, GameOutcome::Aborted)
    }
}

//! Transcript sink port.
//!
//! A finished game (AI won or player won) is handed to a [`TranscriptSink`]
//! for a human-readable record. Aborted games are never recorded.
//!
//! Recording is best effort: the use case logs failures and carries on, so a
//! broken sink can never change a game's outcome.

use chrono::{DateTime, Local};
use sleuth_domain::{GameOutcome, Turn};
use thiserror::Error;

/// Everything a transcript needs about one finished game.
#[derive(Debug, Clone)]
pub struct GameTranscript {
    pub finished_at: DateTime<Local>,
    pub outcome: GameOutcome,
    pub questions_asked: usize,
    pub history: Vec<Turn>,
}

impl GameTranscript {
    pub fn new(outcome: GameOutcome, questions_asked: usize, history: Vec<Turn>) -> Self {
        Self {
            finished_at: Local::now(),
            outcome,
            questions_asked,
            history,
        }
    }

    /// Final movie title, or `unresolved`.
    pub fn movie(&self) -> &str {
        self.outcome.movie()
    }
}

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Failed to write transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for persisting game transcripts.
pub trait TranscriptSink: Send + Sync {
    fn record(&self, transcript: &GameTranscript) -> Result<(), TranscriptError>;
}

/// Sink that discards everything (tests, `--no-transcript`).
pub struct NoTranscript;

impl TranscriptSink for NoTranscript {
    fn record(&self, _transcript: &GameTranscript) -> Result<(), TranscriptError> {
        Ok(())
    }
}

//! Player port
//!
//! The human side of the game: answering questions, confirming guesses and
//! revealing the movie after a lost game. The CLI adapter lives in the
//! presentation layer.

use async_trait::async_trait;
use thiserror::Error;

/// What the player typed in response to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerReply {
    Answer(String),
    /// The player asked to leave the game.
    Exit,
}

/// The player's verdict on a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Exit,
}

/// Failures of the interaction surface itself (not player decisions).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for the human player.
#[async_trait]
pub trait PlayerPort: Send + Sync {
    /// Collect an answer to `question` asked in `round` of `max_rounds`.
    async fn answer(
        &self,
        question: &str,
        round: usize,
        max_rounds: usize,
    ) -> Result<PlayerReply, InteractionError>;

    /// Ask whether `guess` is the movie.
    async fn confirm_guess(&self, guess: &str) -> Result<Confirmation, InteractionError>;

    /// After the player wins: which movie was it? `None` if they declined.
    async fn reveal_movie(&self) -> Result<Option<String>, InteractionError>;
}

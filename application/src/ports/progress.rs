//! Progress notification port
//!
//! Defines the interface for reporting what the game is doing while it waits
//! on the oracle and the player.

/// Which oracle call is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingStep {
    /// Generating the next question.
    Question,
    /// Deciding whether to guess.
    Guess,
}

/// Callback for progress updates during a game
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default so adapters only override what they display.
pub trait GameProgressNotifier: Send + Sync {
    /// Called right before an oracle call starts.
    fn on_thinking_start(&self, _step: ThinkingStep) {}

    /// Called when the oracle call finished, successfully or not.
    fn on_thinking_end(&self) {}

    /// A new question was posed.
    fn on_question(&self, _round: usize, _max_rounds: usize, _question: &str) {}

    /// The oracle named a title.
    fn on_guess(&self, _guess: &str) {}

    /// The oracle said it needs more questions.
    fn on_not_confident(&self, _round: usize) {}

    /// The player rejected a guess.
    fn on_guess_rejected(&self, _guess: &str) {}

    /// The session moved to a backup credential after a quota error.
    fn on_credential_rotated(&self, _from: &str, _to: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoGameProgress;

impl GameProgressNotifier for NoGameProgress {}

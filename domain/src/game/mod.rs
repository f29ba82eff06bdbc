//! Bounded-round guessing game.
//!
//! - [`state::GameState`]: history, round counter and phase
//! - [`state::Phase`]: the state machine's states
//! - [`outcome::GameOutcome`]: how a finished game ended

pub mod outcome;
pub mod state;

/// Default question budget per game.
pub const DEFAULT_MAX_ROUNDS: usize = 20;

//! Domain layer for cine-sleuth
//!
//! This crate contains the game's pure logic: the round-bounded state machine,
//! credential rotation, prompt templates and the output sanitizer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Game
//!
//! The oracle asks up to `max_rounds` narrowing questions about a movie the
//! player is thinking of. After every answer it either guesses a title or
//! says it needs more questions.
//!
//! ## Credential rotation
//!
//! Several API keys can be configured. When one runs out of quota the
//! rotator moves on to the next one; it never goes back.

pub mod config;
pub mod core;
pub mod credential;
pub mod game;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::{CredentialError, GameError, SanitizeError};
pub use credential::{
    entities::Credential,
    rotator::CredentialRotator,
    source::{CredentialSource, StaticCredentialSource},
};
pub use game::{
    DEFAULT_MAX_ROUNDS,
    outcome::GameOutcome,
    state::{GameState, Phase, Turn},
};
pub use prompt::{PromptTemplate, template::NOT_CONFIDENT_PHRASE};
pub use sanitize::{clean, clean_value};
pub use session::entities::{Message, Role};

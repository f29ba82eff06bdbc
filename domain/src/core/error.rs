//! Domain error types

use thiserror::Error;

/// Errors raised by the credential rotator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No API credentials found in the configured sources")]
    NoCredentials,

    #[error("All {0} API credential(s) have been exhausted")]
    AllCredentialsExhausted(usize),
}

/// Errors raised by the output sanitizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("Invalid input: expected text, got {0}")]
    InvalidInput(&'static str),
}

/// Errors raised by illegal game state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Answer must not be blank")]
    BlankAnswer,

    #[error("Cannot {action} while the game is in phase {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
}

impl CredentialError {
    /// True when the rotator has run past its last credential.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CredentialError::AllCredentialsExhausted(_))
    }
}

//! Application error taxonomy.
//!
//! Every failure that can end a game maps to one [`SleuthError`] variant so
//! the driver can tell the player *which kind* of problem occurred.
//!
//! | Source | Variant |
//! |--------|---------|
//! | no credentials / permission denied | [`SleuthError::Credential`] |
//! | quota exhausted on every credential | [`SleuthError::QuotaExhausted`] |
//! | malformed request | [`SleuthError::InvalidRequest`] |
//! | service unavailable / timeout | [`SleuthError::Connection`] |
//! | sanitizer given non-text | [`SleuthError::InvalidInput`] |
//! | anything else from the oracle | [`SleuthError::Oracle`] |

use crate::ports::oracle_gateway::GatewayError;
use crate::ports::player::InteractionError;
use sleuth_domain::{CredentialError, GameError, SanitizeError};
use thiserror::Error;

/// Errors that end a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SleuthError {
    #[error("{0}")]
    Credential(String),

    #[error("{0}")]
    QuotaExhausted(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Oracle(String),

    #[error("{0}")]
    Interaction(String),

    #[error("{0}")]
    State(String),
}

/// Failure class of a [`SleuthError`], for user-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Credential,
    Quota,
    InvalidRequest,
    Connection,
    InvalidInput,
    Oracle,
    Interaction,
    State,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Credential => "API Key Error",
            ErrorKind::Quota => "Quota Error",
            ErrorKind::InvalidRequest => "Invalid Request",
            ErrorKind::Connection => "Connection Error",
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Oracle => "Oracle Error",
            ErrorKind::Interaction => "Input Error",
            ErrorKind::State => "Game State Error",
        }
    }
}

impl SleuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SleuthError::Credential(_) => ErrorKind::Credential,
            SleuthError::QuotaExhausted(_) => ErrorKind::Quota,
            SleuthError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            SleuthError::Connection(_) => ErrorKind::Connection,
            SleuthError::InvalidInput(_) => ErrorKind::InvalidInput,
            SleuthError::Oracle(_) => ErrorKind::Oracle,
            SleuthError::Interaction(_) => ErrorKind::Interaction,
            SleuthError::State(_) => ErrorKind::State,
        }
    }
}

impl From<CredentialError> for SleuthError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::NoCredentials => SleuthError::Credential(format!(
                "{}. Set GEMINI_API_KEY in your environment or .env file.",
                e
            )),
            CredentialError::AllCredentialsExhausted(_) => SleuthError::QuotaExhausted(format!(
                "{}. Please check your billing at https://aistudio.google.com/",
                e
            )),
        }
    }
}

impl From<GatewayError> for SleuthError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::QuotaExhausted(msg) => {
                SleuthError::QuotaExhausted(format!("API quota exceeded: {}", msg))
            }
            GatewayError::InvalidArgument(msg) => {
                SleuthError::InvalidRequest(format!("Invalid request: {}", msg))
            }
            GatewayError::PermissionDenied(msg) => {
                SleuthError::Credential(format!("Invalid API key or permission denied: {}", msg))
            }
            GatewayError::ServiceUnavailable(msg) => SleuthError::Connection(format!(
                "Gemini API service is currently unavailable: {}",
                msg
            )),
            GatewayError::Timeout => {
                SleuthError::Connection("Gemini API request timed out".to_string())
            }
            GatewayError::NonTextReply(e) => SleuthError::from(e),
            GatewayError::Other(msg) => SleuthError::Oracle(format!("API error: {}", msg)),
        }
    }
}

impl From<SanitizeError> for SleuthError {
    fn from(e: SanitizeError) -> Self {
        SleuthError::InvalidInput(e.to_string())
    }
}

impl From<InteractionError> for SleuthError {
    fn from(e: InteractionError) -> Self {
        SleuthError::Interaction(e.to_string())
    }
}

impl From<GameError> for SleuthError {
    fn from(e: GameError) -> Self {
        SleuthError::State(e.to_string())
    }
}

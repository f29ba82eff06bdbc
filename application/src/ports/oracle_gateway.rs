//! Oracle gateway port
//!
//! Defines the interface for talking to the hosted text-generation service
//! that asks the questions and makes the guesses.
//!
//! The core only depends on the classified failures in [`GatewayError`], not
//! on any particular transport.

use async_trait::async_trait;
use sleuth_domain::{Credential, Message, SanitizeError};
use thiserror::Error;

/// Classified failures an oracle call can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Oracle reply is not text: {0}")]
    NonTextReply(SanitizeError),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for oracle communication
///
/// This port defines how the application layer opens conversations with the
/// generation service. Implementations (adapters) live in the infrastructure
/// layer.
#[async_trait]
pub trait OracleGateway: Send + Sync {
    /// Open a conversation bound to `credential`.
    ///
    /// `history` seeds the conversation with earlier exchanges, so a
    /// conversation rebuilt under a new credential continues exactly where the
    /// old one stopped.
    async fn open_session(
        &self,
        credential: &Credential,
        history: Vec<Message>,
    ) -> Result<Box<dyn OracleConversation>, GatewayError>;
}

/// A live conversation bound to one credential
#[async_trait]
pub trait OracleConversation: Send + Sync {
    /// Name of the credential this conversation authenticates with.
    fn credential_name(&self) -> &str;

    /// Send a prompt and get the reply.
    ///
    /// On success both the prompt and the reply are appended to the history.
    /// A failed call leaves the history untouched.
    async fn send(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Snapshot of all successful exchanges, oldest first.
    async fn history(&self) -> Vec<Message>;
}

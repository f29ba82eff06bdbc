//! Port for structured conversation logging.
//!
//! Records every oracle exchange, credential rotation and game result as a
//! machine-readable event stream (JSONL in the infrastructure adapter).
//!
//! This is separate from `tracing`: tracing carries diagnostics for
//! developers, this port captures the full conversation. Events carry
//! credential *names* only, never secrets.

use serde::Serialize;
use sleuth_domain::{GameOutcome, Turn};

/// A structured conversation event.
///
/// Serializes with a snake_case `type` tag, e.g.
/// `{"type":"credential_rotated","from":"A","to":"B","replayed_messages":4}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    OraclePrompt {
        credential: String,
        bytes: usize,
        text: String,
    },
    OracleResponse {
        credential: String,
        bytes: usize,
        text: String,
    },
    OracleError {
        credential: String,
        error: String,
    },
    CredentialRotated {
        from: String,
        to: String,
        replayed_messages: usize,
    },
    GameFinished {
        result: &'static str,
        movie: String,
        questions_asked: usize,
        turns: Vec<Turn>,
    },
}

impl ConversationEvent {
    pub fn oracle_prompt(credential: &str, prompt: &str) -> Self {
        ConversationEvent::OraclePrompt {
            credential: credential.to_string(),
            bytes: prompt.len(),
            text: prompt.to_string(),
        }
    }

    pub fn oracle_response(credential: &str, response: &str) -> Self {
        ConversationEvent::OracleResponse {
            credential: credential.to_string(),
            bytes: response.len(),
            text: response.to_string(),
        }
    }

    pub fn oracle_error(credential: &str, error: &str) -> Self {
        ConversationEvent::OracleError {
            credential: credential.to_string(),
            error: error.to_string(),
        }
    }

    pub fn credential_rotated(from: &str, to: &str, replayed_messages: usize) -> Self {
        ConversationEvent::CredentialRotated {
            from: from.to_string(),
            to: to.to_string(),
            replayed_messages,
        }
    }

    pub fn game_finished(outcome: &GameOutcome, history: &[Turn]) -> Self {
        ConversationEvent::GameFinished {
            result: outcome.label(),
            movie: outcome.movie().to_string(),
            questions_asked: history.len(),
            turns: history.to_vec(),
        }
    }

    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ConversationEvent::OraclePrompt { .. } => "oracle_prompt",
            ConversationEvent::OracleResponse { .. } => "oracle_response",
            ConversationEvent::OracleError { .. } => "oracle_error",
            ConversationEvent::CredentialRotated { .. } => "credential_rotated",
            ConversationEvent::GameFinished { .. } => "game_finished",
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging can never
/// disrupt a game; adapters report their own failures through `tracing`.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

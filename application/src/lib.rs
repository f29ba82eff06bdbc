//! Application layer for cine-sleuth
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GameConfig;
pub use error::{ErrorKind, SleuthError};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    oracle_gateway::{GatewayError, OracleConversation, OracleGateway},
    player::{Confirmation, InteractionError, PlayerPort, PlayerReply},
    progress::{GameProgressNotifier, NoGameProgress, ThinkingStep},
    transcript::{GameTranscript, NoTranscript, TranscriptError, TranscriptSink},
};
pub use use_cases::oracle_session::{OracleSession, SharedRotator, shared_rotator};
pub use use_cases::play_game::{GameFailure, GameReport, PlayGameUseCase};

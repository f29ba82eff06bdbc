//! Infrastructure layer for cine-sleuth
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini REST gateway, environment credential
//! discovery, configuration file loading, and on-disk logs.

pub mod config;
pub mod credentials;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCredentialsConfig, FileGameConfig, FileLoggingConfig,
    FileOracleConfig, FileTranscriptConfig,
};
pub use credentials::{EnvCredentialSource, load_dotenv};
pub use gemini::{
    error::GeminiError,
    gateway::{GeminiGateway, GeminiSettings},
    session::GeminiConversation,
};
pub use logging::{JsonlConversationLogger, TextTranscriptSink};

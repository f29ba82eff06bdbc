//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and validated into [`ConfigIssue`]s.

mod credentials;
mod game;
mod logging;
mod oracle;
mod transcript;

pub use credentials::FileCredentialsConfig;
pub use game::FileGameConfig;
pub use logging::FileLoggingConfig;
pub use oracle::FileOracleConfig;
pub use transcript::FileTranscriptConfig;

use serde::{Deserialize, Serialize};
use sleuth_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Game settings
    pub game: FileGameConfig,
    /// Gemini endpoint settings
    pub oracle: FileOracleConfig,
    /// Where API keys come from
    pub credentials: FileCredentialsConfig,
    /// Human-readable game log
    pub transcript: FileTranscriptConfig,
    /// Diagnostic and conversation logs
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.game.validate());
        issues.extend(self.oracle.validate());
        issues.extend(self.credentials.validate());
        issues
    }
}

//! Transcript configuration from TOML (`[transcript]` section)

use serde::{Deserialize, Serialize};

/// Raw transcript configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// Append finished games to `path`
    pub enabled: bool,
    pub path: String,
}

impl Default for FileTranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "logs/log.txt".to_string(),
        }
    }
}

//! Credential discovery configuration from TOML (`[credentials]` section)

use serde::{Deserialize, Serialize};
use sleuth_domain::{ConfigIssue, ConfigIssueCode};

/// Raw credential configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCredentialsConfig {
    /// Variable holding the primary key
    pub primary_env: String,
    /// Prefix of numbered backup variables (`<prefix>1`, `<prefix>2`, ...)
    pub backup_env_prefix: String,
    /// Number of backup slots probed
    pub max_backups: usize,
    /// Read `.env` before looking at the environment
    pub load_dotenv: bool,
    /// Rewind to the primary key before every new game
    pub reset_between_games: bool,
}

impl Default for FileCredentialsConfig {
    fn default() -> Self {
        Self {
            primary_env: "GEMINI_API_KEY".to_string(),
            backup_env_prefix: "GEMINI_API_KEY_".to_string(),
            max_backups: 5,
            load_dotenv: true,
            reset_between_games: false,
        }
    }
}

impl FileCredentialsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.primary_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "credentials.primary_env".to_string(),
                },
                "credentials.primary_env cannot be empty",
            ));
        }
        if self.max_backups > 0 && self.backup_env_prefix.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "credentials.backup_env_prefix".to_string(),
                },
                "credentials.backup_env_prefix is empty; backups would be read from variables named 1, 2, ...",
            ));
        }
        issues
    }
}

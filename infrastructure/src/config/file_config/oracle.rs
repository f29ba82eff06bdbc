//! Oracle configuration from TOML (`[oracle]` section)

use serde::{Deserialize, Serialize};
use sleuth_domain::{ConfigIssue, ConfigIssueCode};

/// Raw oracle configuration from TOML
///
/// # Example
///
/// ```toml
/// [oracle]
/// model = "gemini-2.0-flash"
/// base_url = "https://generativelanguage.googleapis.com"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    /// Gemini model name
    pub model: String,
    /// API root, without the `/v1beta` path
    pub base_url: String,
    /// Per-request deadline
    pub timeout_secs: u64,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileOracleConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "oracle.model".to_string(),
                },
                "oracle.model cannot be empty",
            ));
        }
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "oracle.base_url".to_string(),
                },
                "oracle.base_url cannot be empty",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "oracle.timeout_secs".to_string(),
                },
                "oracle.timeout_secs cannot be 0",
            ));
        }
        issues
    }
}

//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "~/.local/state/cine-sleuth"       # daily rolling diagnostic log
/// conversation_log = "logs/oracle.jsonl"   # JSONL oracle exchanges
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the rolling diagnostic log; stderr only when unset
    pub dir: Option<String>,
    /// JSONL conversation log path; disabled when unset
    pub conversation_log: Option<String>,
}

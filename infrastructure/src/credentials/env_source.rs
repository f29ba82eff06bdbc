//! Environment-variable credential source.
//!
//! Discovers the primary key and numbered backups:
//!
//! ```text
//! GEMINI_API_KEY      → primary
//! GEMINI_API_KEY_1    → backup 1
//! GEMINI_API_KEY_2    → backup 2
//! ...                 (up to max_backups)
//! ```
//!
//! Unset or blank variables are skipped, so gaps in the numbering are fine.

use sleuth_domain::{Credential, CredentialSource};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default name of the primary key variable.
pub const DEFAULT_PRIMARY_ENV: &str = "GEMINI_API_KEY";

/// Default prefix of the numbered backup variables.
pub const DEFAULT_BACKUP_PREFIX: &str = "GEMINI_API_KEY_";

/// Default number of backup slots probed.
pub const DEFAULT_MAX_BACKUPS: usize = 5;

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads credentials from process environment variables.
pub struct EnvCredentialSource {
    primary: String,
    backup_prefix: String,
    max_backups: usize,
    lookup: Lookup,
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_ENV, DEFAULT_BACKUP_PREFIX, DEFAULT_MAX_BACKUPS)
    }
}

impl EnvCredentialSource {
    pub fn new(
        primary: impl Into<String>,
        backup_prefix: impl Into<String>,
        max_backups: usize,
    ) -> Self {
        Self {
            primary: primary.into(),
            backup_prefix: backup_prefix.into(),
            max_backups,
            lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replace the variable lookup (tests).
    pub fn with_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// Variable names probed, in priority order.
    pub fn variable_names(&self) -> Vec<String> {
        std::iter::once(self.primary.clone())
            .chain((1..=self.max_backups).map(|i| format!("{}{}", self.backup_prefix, i)))
            .collect()
    }
}

impl CredentialSource for EnvCredentialSource {
    fn discover(&self) -> Vec<Credential> {
        let credentials: Vec<Credential> = self
            .variable_names()
            .into_iter()
            .filter_map(|name| {
                let secret = (self.lookup)(&name)?;
                let secret = secret.trim();
                if secret.is_empty() {
                    None
                } else {
                    Some(Credential::new(name.as_str(), secret))
                }
            })
            .collect();
        debug!("Discovered {} credential(s) in environment", credentials.len());
        credentials
    }
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Existing variables are not overwritten.
///
/// Returns the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Could not read .env file: {}", e);
            None
        }
    }
}

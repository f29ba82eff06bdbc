//! Forward-only credential rotation.
//!
//! The rotator walks an ordered credential list exactly once:
//!
//! ```text
//! [primary] ──exhausted──▶ [backup 1] ──exhausted──▶ ... ──▶ (terminal)
//! ```
//!
//! `active_index` only ever grows. Once it reaches the end of the list the
//! rotator stays exhausted until [`CredentialRotator::reset`] is called, so a
//! credential known to be out of quota is never retried in the same run.

use super::entities::Credential;
use super::source::CredentialSource;
use crate::core::error::CredentialError;
use std::collections::BTreeSet;

/// Ordered credentials plus the record of which ones ran out of quota.
///
/// # Examples
///
/// ```
/// use sleuth_domain::{Credential, CredentialRotator, StaticCredentialSource};
///
/// let source = StaticCredentialSource::new(vec![
///     Credential::new("GEMINI_API_KEY", "primary"),
///     Credential::new("GEMINI_API_KEY_1", "backup"),
/// ]);
///
/// let mut rotator = CredentialRotator::new();
/// assert_eq!(rotator.load(&source).unwrap(), "primary");
/// assert!(rotator.has_fallback());
/// assert_eq!(rotator.mark_exhausted_and_advance().unwrap(), "backup");
/// assert!(!rotator.has_fallback());
/// assert!(rotator.mark_exhausted_and_advance().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CredentialRotator {
    credentials: Vec<Credential>,
    active_index: usize,
    exhausted: BTreeSet<String>,
}

impl CredentialRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rotator directly from a credential list.
    pub fn with_credentials(credentials: Vec<Credential>) -> Result<Self, CredentialError> {
        if credentials.is_empty() {
            return Err(CredentialError::NoCredentials);
        }
        Ok(Self {
            credentials,
            active_index: 0,
            exhausted: BTreeSet::new(),
        })
    }

    /// Discover credentials from `source` and make the first one active.
    ///
    /// Replaces any previously loaded list. Returns the active secret.
    pub fn load(&mut self, source: &dyn CredentialSource) -> Result<&str, CredentialError> {
        *self = Self::with_credentials(source.discover())?;
        self.current()
    }

    /// Secret of the active credential.
    pub fn current(&self) -> Result<&str, CredentialError> {
        self.active().map(Credential::secret)
    }

    /// The active credential (name and secret).
    pub fn active(&self) -> Result<&Credential, CredentialError> {
        self.credentials
            .get(self.active_index)
            .ok_or(CredentialError::AllCredentialsExhausted(self.credentials.len()))
    }

    /// Mark the active credential exhausted and move to the next one.
    ///
    /// Returns the new active secret, or `AllCredentialsExhausted` once the
    /// list is used up. That error is terminal: further calls keep failing
    /// without touching the state.
    pub fn mark_exhausted_and_advance(&mut self) -> Result<&str, CredentialError> {
        let Some(active) = self.credentials.get(self.active_index) else {
            return Err(CredentialError::AllCredentialsExhausted(
                self.credentials.len(),
            ));
        };
        self.exhausted.insert(active.name().to_string());
        self.active_index += 1;
        self.current()
    }

    /// True iff there is at least one credential after the active one.
    pub fn has_fallback(&self) -> bool {
        self.active_index + 1 < self.credentials.len()
    }

    /// Rewind to the primary credential and forget exhaustion marks.
    pub fn reset(&mut self) {
        self.active_index = 0;
        self.exhausted.clear();
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// True once every credential has been marked exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.active_index >= self.credentials.len()
    }

    pub fn is_marked_exhausted(&self, name: &str) -> bool {
        self.exhausted.contains(name)
    }

    pub fn exhausted_count(&self) -> usize {
        self.exhausted.len()
    }

    /// Names of all loaded credentials, in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.credentials.iter().map(Credential::name)
    }
}

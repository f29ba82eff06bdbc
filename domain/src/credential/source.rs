//! Credential source trait

use super::entities::Credential;

/// Supplies an ordered list of credentials, primary first.
///
/// Implementations live in the infrastructure layer (environment variables,
/// `.env` files). An empty list is a valid answer; the rotator turns it into
/// [`CredentialError::NoCredentials`](crate::CredentialError::NoCredentials).
pub trait CredentialSource: Send + Sync {
    fn discover(&self) -> Vec<Credential>;
}

/// Fixed, in-memory credential list.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource {
    credentials: Vec<Credential>,
}

impl StaticCredentialSource {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }
}

impl CredentialSource for StaticCredentialSource {
    fn discover(&self) -> Vec<Credential> {
        self.credentials.clone()
    }
}

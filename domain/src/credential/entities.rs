//! Credential value object

use std::fmt;

/// A named API secret (Value Object).
///
/// The name identifies where the secret came from (e.g. the environment
/// variable) and is safe to log. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    name: String,
    secret: String,
}

impl Credential {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("GEMINI_API_KEY", "sk-very-secret");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("GEMINI_API_KEY"));
        assert!(!debug.contains("sk-very-secret"));
    }
}

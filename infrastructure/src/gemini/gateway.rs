//! Gemini oracle gateway implementation

use crate::gemini::session::GeminiConversation;
use async_trait::async_trait;
use sleuth_application::ports::oracle_gateway::{GatewayError, OracleConversation, OracleGateway};
use sleuth_domain::{Credential, Message};
use std::time::Duration;
use tracing::info;

/// Public Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiSettings {
    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Oracle gateway backed by the Gemini REST API
///
/// One HTTP client is shared by every conversation the gateway opens; each
/// conversation carries its own credential and history.
pub struct GeminiGateway {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("cine-sleuth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "GeminiGateway initialized (model: {}, timeout: {:?})",
            settings.model, settings.timeout
        );

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }
}

#[async_trait]
impl OracleGateway for GeminiGateway {
    async fn open_session(
        &self,
        credential: &Credential,
        history: Vec<Message>,
    ) -> Result<Box<dyn OracleConversation>, GatewayError> {
        Ok(Box::new(GeminiConversation::new(
            self.client.clone(),
            self.settings.endpoint(),
            credential.clone(),
            history,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let settings = GeminiSettings {
            base_url: "http://localhost:8080/".to_string(),
            model: "gemini-1.5-flash".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_open_session_seeds_history() {
        let gateway = GeminiGateway::new(GeminiSettings::default()).unwrap();
        let history = vec![Message::user("Ask"), Message::model("Is it animated?")];
        let conversation = gateway
            .open_session(&Credential::new("GEMINI_API_KEY_1", "secret"), history.clone())
            .await
            .unwrap();

        assert_eq!(conversation.credential_name(), "GEMINI_API_KEY_1");
        assert_eq!(conversation.history().await, history);
    }
}

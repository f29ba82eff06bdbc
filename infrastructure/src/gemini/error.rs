//! Error types for the Gemini adapter

use super::protocol::ErrorEnvelope;
use sleuth_application::ports::oracle_gateway::GatewayError;
use sleuth_domain::SanitizeError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {http_status} ({status}): {message}")]
    Api {
        http_status: u16,
        status: String,
        message: String,
    },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Empty response from Gemini")]
    EmptyResponse,

    #[error("Unusable reply: {0}")]
    NonText(#[from] SanitizeError),
}

impl GeminiError {
    /// Build an [`GeminiError::Api`] from a non-success response.
    ///
    /// Falls back to the raw body when it is not a Google error envelope.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => GeminiError::Api {
                http_status: envelope.error.code.unwrap_or(http_status),
                status: envelope.error.status.unwrap_or_default(),
                message: envelope.error.message,
            },
            Err(_) => GeminiError::Api {
                http_status,
                status: String::new(),
                message: body.trim().to_string(),
            },
        }
    }
}

impl From<GeminiError> for GatewayError {
    fn from(e: GeminiError) -> Self {
        let text = e.to_string();
        match e {
            GeminiError::Http(err) if err.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(err) if err.is_connect() => GatewayError::ServiceUnavailable(text),
            GeminiError::Http(_) => GatewayError::Other(text),
            GeminiError::Api {
                http_status,
                status,
                ..
            } => match (status.as_str(), http_status) {
                ("RESOURCE_EXHAUSTED", _) | (_, 429) => GatewayError::QuotaExhausted(text),
                ("INVALID_ARGUMENT", _) | (_, 400) => GatewayError::InvalidArgument(text),
                ("PERMISSION_DENIED", _) | ("UNAUTHENTICATED", _) | (_, 401) | (_, 403) => {
                    GatewayError::PermissionDenied(text)
                }
                ("UNAVAILABLE", _) | (_, 503) => GatewayError::ServiceUnavailable(text),
                ("DEADLINE_EXCEEDED", _) | (_, 504) => GatewayError::Timeout,
                _ => GatewayError::Other(text),
            },
            GeminiError::Blocked(_) | GeminiError::EmptyResponse => GatewayError::Other(text),
            GeminiError::NonText(e) => GatewayError::NonTextReply(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(http_status: u16, body: &str) -> GatewayError {
        GeminiError::from_response(http_status, body).into()
    }

    #[test]
    fn test_quota_exhausted() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(classify(429, body), GatewayError::QuotaExhausted(_)));
    }

    #[test]
    fn test_invalid_argument() {
        let body = r#"{"error": {"code": 400, "message": "Invalid JSON payload", "status": "INVALID_ARGUMENT"}}"#;
        let error = classify(400, body);
        assert!(matches!(error, GatewayError::InvalidArgument(ref m) if m.contains("Invalid JSON payload")));
    }

    #[test]
    fn test_permission_denied() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        assert!(matches!(classify(403, body), GatewayError::PermissionDenied(_)));
    }

    #[test]
    fn test_service_unavailable() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE"}}"#;
        assert!(matches!(classify(503, body), GatewayError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_non_json_body_falls_back_to_http_status() {
        assert!(matches!(classify(429, "Too Many Requests"), GatewayError::QuotaExhausted(_)));
        assert!(matches!(classify(500, "<html>oops</html>"), GatewayError::Other(_)));
    }

    #[test]
    fn test_status_string_wins_over_http_code() {
        let body = r#"{"error": {"message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(classify(400, body), GatewayError::QuotaExhausted(_)));
    }
}

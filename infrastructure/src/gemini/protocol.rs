//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! # Request
//!
//! ```json
//! {"contents": [{"role": "user", "parts": [{"text": "..."}]},
//!               {"role": "model", "parts": [{"text": "..."}]}]}
//! ```
//!
//! # Error body
//!
//! ```json
//! {"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sleuth_domain::{Message, Role, SanitizeError, clean_value};

/// `POST /v1beta/models/{model}:generateContent` body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Replay `history` and append `prompt` as the newest user turn.
    pub fn from_history(history: &[Message], prompt: &str) -> Self {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::from(&Message::user(prompt)));
        Self { contents }
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::User => "user",
            Role::Model => "model",
        };
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: Some(message.content.clone()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Successful response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Sanitized text of the first candidate, all parts concatenated.
    ///
    /// `Ok(None)` when there is no candidate text. A part whose `text` is not
    /// a JSON string fails with [`SanitizeError::InvalidInput`].
    pub fn text(&self) -> Result<Option<String>, SanitizeError> {
        let Some(content) = self.candidates.first().and_then(|c| c.content.as_ref()) else {
            return Ok(None);
        };
        let mut joined = String::new();
        for value in content.parts.iter().filter_map(|part| part.text.as_ref()) {
            match value {
                Value::String(text) => joined.push_str(text),
                other => return clean_value(other).map(Some),
            }
        }
        let text = clean_value(&Value::String(joined))?;
        Ok((!text.is_empty()).then_some(text))
    }

    /// Why the prompt was blocked, if it was.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Candidate turn as received. Part text stays untyped until sanitized.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error response body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_replays_history_then_prompt() {
        let history = vec![Message::user("Ask a question"), Message::model("Is it animated?")];
        let request = GenerateContentRequest::from_history(&history, "Guess the movie");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "Is it animated?");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "Guess the movie");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "The "}, {"text": "Matrix"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().unwrap().as_deref(), Some("The Matrix"));
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), Ok(None));
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_response_text_is_sanitized() {
        let body = r###"{"candidates": [{"content": {"parts": [{"text": "## **Heat** (1995)\n\n\n"}]}}]}"###;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().unwrap().as_deref(), Some("Heat (1995)"));
    }

    #[test]
    fn test_non_text_part_is_rejected() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "The "}, {"text": 42}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.text(),
            Err(SanitizeError::InvalidInput("a number"))
        );
    }

    #[test]
    fn test_markup_only_reply_has_no_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "```\n```"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), Ok(None));
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code, Some(429));
        assert_eq!(envelope.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }
}

//! Gemini conversation.
//!
//! Provides [`GeminiConversation`] which implements [`OracleConversation`].
//! The REST endpoint is stateless, so the conversation keeps its own history
//! and replays it with every request.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use sleuth_application::ports::oracle_gateway::{GatewayError, OracleConversation};
use sleuth_domain::{Credential, Message};
use tokio::sync::Mutex;
use tracing::debug;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A conversation bound to one credential.
pub struct GeminiConversation {
    client: reqwest::Client,
    endpoint: String,
    credential: Credential,
    history: Mutex<Vec<Message>>,
}

impl GeminiConversation {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        credential: Credential,
        history: Vec<Message>,
    ) -> Self {
        Self {
            client,
            endpoint,
            credential,
            history: Mutex::new(history),
        }
    }

    /// Send `prompt` with the full history. History is only extended when a
    /// reply arrives.
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let mut history = self.history.lock().await;
        let request = GenerateContentRequest::from_history(&history, prompt);
        debug!(
            credential = %self.credential.name(),
            "POST {} ({} turns)",
            self.endpoint,
            request.contents.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.credential.secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::from_response(status.as_u16(), &body));
        }

        let body: GenerateContentResponse = response.json().await?;
        let Some(text) = body.text()? else {
            return Err(match body.block_reason() {
                Some(reason) => GeminiError::Blocked(reason.to_string()),
                None => GeminiError::EmptyResponse,
            });
        };

        history.push(Message::user(prompt));
        history.push(Message::model(text.clone()));
        Ok(text)
    }
}

#[async_trait]
impl OracleConversation for GeminiConversation {
    fn credential_name(&self) -> &str {
        self.credential.name()
    }

    async fn send(&self, prompt: &str) -> std::result::Result<String, GatewayError> {
        self.ask(prompt).await.map_err(GatewayError::from)
    }

    async fn history(&self) -> Vec<Message> {
        self.history.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_domain::SanitizeError;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1beta/models/test:generateContent", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });

        (url, handle)
    }

    fn conversation(endpoint: String, history: Vec<Message>) -> GeminiConversation {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        GeminiConversation::new(
            client,
            endpoint,
            Credential::new("GEMINI_API_KEY", "test-key"),
            history,
        )
    }

    #[tokio::test]
    async fn test_send_replays_history_and_records_reply() {
        let body = r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Is it **animated**?"}]}}]}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let conversation = conversation(url, vec![Message::user("hi"), Message::model("hello")]);

        let reply = conversation.send("Ask a question").await.unwrap();
        assert_eq!(reply, "Is it animated?");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/test:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains(r#""text":"hello""#));
        assert!(request.contains(r#""text":"Ask a question""#));

        let history = conversation.history().await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[3], Message::model("Is it animated?"));
    }

    #[tokio::test]
    async fn test_quota_error_leaves_history_untouched() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let (url, server) = serve_once("429 Too Many Requests", body).await;
        let conversation = conversation(url, Vec::new());

        let error = conversation.send("Ask").await.unwrap_err();
        assert!(matches!(error, GatewayError::QuotaExhausted(_)));
        assert!(conversation.history().await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let (url, server) = serve_once("200 OK", r#"{"candidates": []}"#).await;
        let conversation = conversation(url, Vec::new());

        let error = conversation.send("Ask").await.unwrap_err();
        assert!(matches!(error, GatewayError::Other(ref m) if m.contains("Empty response")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_text_reply_is_rejected() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": {"title": "Heat"}}]}}]}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let conversation = conversation(url, Vec::new());

        let error = conversation.send("Ask").await.unwrap_err();
        assert_eq!(
            error,
            GatewayError::NonTextReply(SanitizeError::InvalidInput("an object"))
        );
        assert!(conversation.history().await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let conversation = conversation(format!("http://{}/", addr), Vec::new());
        let error = conversation.send("Ask").await.unwrap_err();
        assert!(matches!(
            error,
            GatewayError::ServiceUnavailable(_) | GatewayError::Timeout
        ));
    }
}

//! Resilient oracle session.
//!
//! [`OracleSession`] owns one live [`OracleConversation`] and keeps it usable
//! across quota exhaustion:
//!
//! ```text
//! send(prompt)
//!   ├─ Ok(reply)                    → reply
//!   ├─ QuotaExhausted + fallback    → rotate credential,
//!   │                                 reopen conversation seeded with history,
//!   │                                 retry the same prompt
//!   ├─ QuotaExhausted, no fallback  → SleuthError::QuotaExhausted
//!   ├─ InvalidArgument              → SleuthError::InvalidRequest   (no retry)
//!   ├─ PermissionDenied             → SleuthError::Credential       (no retry)
//!   ├─ ServiceUnavailable / Timeout → SleuthError::Connection       (no retry)
//!   └─ Other                        → SleuthError::Oracle
//! ```
//!
//! Rotations within one `send` are bounded by the number of loaded
//! credentials.

use crate::error::SleuthError;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::oracle_gateway::{GatewayError, OracleConversation, OracleGateway};
use crate::ports::progress::{GameProgressNotifier, NoGameProgress};
use sleuth_domain::util::preview;
use sleuth_domain::{Credential, CredentialError, CredentialRotator, Message};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Process-wide rotator handle, created by the entry point and injected.
///
/// The lock is only held around rotator calls, never across an `.await`.
pub type SharedRotator = Arc<Mutex<CredentialRotator>>;

/// Wrap a rotator for sharing between sessions.
pub fn shared_rotator(rotator: CredentialRotator) -> SharedRotator {
    Arc::new(Mutex::new(rotator))
}

fn lock(rotator: &SharedRotator) -> MutexGuard<'_, CredentialRotator> {
    rotator.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Conversation with the oracle that survives quota exhaustion.
pub struct OracleSession {
    gateway: Arc<dyn OracleGateway>,
    rotator: SharedRotator,
    conversation: Box<dyn OracleConversation>,
    conversation_logger: Arc<dyn ConversationLogger>,
    rotations: usize,
}

impl OracleSession {
    /// Open a fresh conversation under the rotator's active credential.
    pub async fn open(
        gateway: Arc<dyn OracleGateway>,
        rotator: SharedRotator,
    ) -> Result<Self, SleuthError> {
        let credential = lock(&rotator).active()?.clone();
        info!("Opening oracle session with {}", credential.name());
        let conversation = gateway.open_session(&credential, Vec::new()).await?;

        Ok(Self {
            gateway,
            rotator,
            conversation,
            conversation_logger: Arc::new(NoConversationLogger),
            rotations: 0,
        })
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Name of the credential the live conversation is bound to.
    pub fn credential_name(&self) -> &str {
        self.conversation.credential_name()
    }

    /// How many times this session switched credentials.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    pub async fn history(&self) -> Vec<Message> {
        self.conversation.history().await
    }

    pub async fn send(&mut self, prompt: &str) -> Result<String, SleuthError> {
        self.send_with_progress(prompt, &NoGameProgress).await
    }

    /// Send `prompt`, rotating credentials on quota exhaustion.
    pub async fn send_with_progress(
        &mut self,
        prompt: &str,
        progress: &dyn GameProgressNotifier,
    ) -> Result<String, SleuthError> {
        let max_rotations = lock(&self.rotator).len();
        let mut attempts = 0;

        loop {
            let credential = self.conversation.credential_name().to_string();
            debug!(credential = %credential, "Sending prompt: {}", preview(prompt, 80));
            self.conversation_logger
                .log(ConversationEvent::oracle_prompt(&credential, prompt));

            let error = match self.conversation.send(prompt).await {
                Ok(reply) => {
                    debug!(credential = %credential, "Oracle replied: {}", preview(&reply, 80));
                    self.conversation_logger
                        .log(ConversationEvent::oracle_response(&credential, &reply));
                    return Ok(reply);
                }
                Err(e) => e,
            };

            self.conversation_logger
                .log(ConversationEvent::oracle_error(&credential, &error.to_string()));

            let message = match error {
                GatewayError::QuotaExhausted(message) => message,
                other => {
                    warn!(credential = %credential, "Oracle call failed: {}", other);
                    return Err(other.into());
                }
            };

            if attempts >= max_rotations {
                return Err(GatewayError::QuotaExhausted(message).into());
            }
            attempts += 1;

            let next = self.next_credential(&credential, &message)?;
            self.rebind(next, progress).await?;
        }
    }

    /// Pick the credential to retry with after `current` ran out of quota.
    fn next_credential(&self, current: &str, message: &str) -> Result<Credential, SleuthError> {
        let mut rotator = lock(&self.rotator);

        // Another session sharing the rotator may already have moved on.
        if let Ok(active) = rotator.active()
            && active.name() != current
        {
            return Ok(active.clone());
        }

        if !rotator.has_fallback() {
            // Mark the last credential as well so later games fail fast.
            match rotator.mark_exhausted_and_advance() {
                Err(CredentialError::AllCredentialsExhausted(_)) => {}
                Ok(name) => {
                    return Err(SleuthError::Oracle(format!(
                        "rotator advanced to {} without a fallback",
                        name
                    )));
                }
                Err(other) => return Err(other.into()),
            }
            warn!("Quota exhausted on every credential ({})", rotator.len());
            return Err(SleuthError::QuotaExhausted(format!(
                "API quota exceeded on all {} key(s): {}",
                rotator.len(),
                message
            )));
        }

        rotator.mark_exhausted_and_advance()?;
        Ok(rotator.active()?.clone())
    }

    /// Replace the live conversation with one bound to `credential`, replaying
    /// the exchanges so far.
    async fn rebind(
        &mut self,
        credential: Credential,
        progress: &dyn GameProgressNotifier,
    ) -> Result<(), SleuthError> {
        let from = self.conversation.credential_name().to_string();
        let history = self.conversation.history().await;
        let replayed = history.len();

        let conversation = self.gateway.open_session(&credential, history).await?;
        warn!(
            "Quota exhausted on {}, switched to backup credential {} ({} messages replayed)",
            from,
            credential.name(),
            replayed
        );

        self.conversation_logger.log(ConversationEvent::credential_rotated(
            &from,
            credential.name(),
            replayed,
        ));
        progress.on_credential_rotated(&from, credential.name());

        self.conversation = conversation;
        self.rotations += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::use_cases::test_support::ScriptedGateway;
    use sleuth_domain::Role;

    fn rotator(names: &[&str]) -> SharedRotator {
        shared_rotator(
            CredentialRotator::with_credentials(
                names
                    .iter()
                    .map(|n| Credential::new(*n, format!("{}-secret", n)))
                    .collect(),
            )
            .unwrap(),
        )
    }

    fn quota() -> GatewayError {
        GatewayError::QuotaExhausted("429 RESOURCE_EXHAUSTED".to_string())
    }

    #[tokio::test]
    async fn test_send_returns_reply() {
        let gateway = Arc::new(ScriptedGateway::new().script("KEY_A", vec![Ok("Is it a comedy?")]));
        let mut session = OracleSession::open(gateway.clone(), rotator(&["KEY_A"]))
            .await
            .unwrap();

        assert_eq!(session.send("ask").await.unwrap(), "Is it a comedy?");
        assert_eq!(session.rotations(), 0);
        assert_eq!(session.history().await.len(), 2);
    }

    #[tokio::test]
    async fn test_quota_rotates_and_preserves_history() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("KEY_A", vec![Ok("Q1"), Err(quota())])
                .script("KEY_B", vec![Ok("Q2")]),
        );
        let rotator = rotator(&["KEY_A", "KEY_B"]);
        let mut session = OracleSession::open(gateway.clone(), rotator.clone())
            .await
            .unwrap();

        assert_eq!(session.send("first").await.unwrap(), "Q1");
        assert_eq!(session.send("second").await.unwrap(), "Q2");

        assert_eq!(session.credential_name(), "KEY_B");
        assert_eq!(session.rotations(), 1);

        // The rebuilt conversation was seeded with the exact prior exchange.
        let opened = gateway.opened();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[1].0, "KEY_B");
        assert_eq!(
            opened[1].1,
            vec![Message::user("first"), Message::model("Q1")]
        );

        // The failed attempt did not leak into history; the retry did land.
        let history = session.history().await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[2], Message::user("second"));
        assert_eq!(history[3].role, Role::Model);

        let rotator = lock(&rotator);
        assert!(rotator.is_marked_exhausted("KEY_A"));
        assert_eq!(rotator.active_index(), 1);
    }

    #[tokio::test]
    async fn test_first_send_rotation_is_transparent() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("KEY_A", vec![Err(quota())])
                .script("KEY_B", vec![Ok("Is it animated?")]),
        );
        let mut session = OracleSession::open(gateway.clone(), rotator(&["KEY_A", "KEY_B"]))
            .await
            .unwrap();

        assert_eq!(session.send("ask").await.unwrap(), "Is it animated?");
        assert_eq!(
            gateway.prompts(),
            vec![
                ("KEY_A".to_string(), "ask".to_string()),
                ("KEY_B".to_string(), "ask".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_quota_without_fallback_is_terminal() {
        let gateway = Arc::new(ScriptedGateway::new().script("KEY_A", vec![Err(quota())]));
        let rotator = rotator(&["KEY_A"]);
        let mut session = OracleSession::open(gateway.clone(), rotator.clone())
            .await
            .unwrap();

        let error = session.send("ask").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Quota);
        assert!(lock(&rotator).is_exhausted());
        assert_eq!(gateway.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_quota_after_rotator_already_exhausted_is_terminal() {
        let gateway = Arc::new(ScriptedGateway::new().script("KEY_A", vec![Err(quota())]));
        let rotator = rotator(&["KEY_A"]);
        let mut session = OracleSession::open(gateway.clone(), rotator.clone())
            .await
            .unwrap();

        // Another game used up the only key in the meantime.
        let _ = lock(&rotator).mark_exhausted_and_advance();

        let error = session.send("ask").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Quota);
        assert_eq!(lock(&rotator).active_index(), 1);
        assert_eq!(lock(&rotator).exhausted_count(), 1);
        assert_eq!(gateway.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_rotation_is_bounded_by_credentials() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("KEY_A", vec![Err(quota())])
                .script("KEY_B", vec![Err(quota())])
                .script("KEY_C", vec![Err(quota())]),
        );
        let mut session = OracleSession::open(gateway.clone(), rotator(&["KEY_A", "KEY_B", "KEY_C"]))
            .await
            .unwrap();

        let error = session.send("ask").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Quota);
        assert_eq!(gateway.prompts().len(), 3);
        assert_eq!(session.rotations(), 2);
    }

    #[tokio::test]
    async fn test_non_quota_errors_are_not_retried() {
        let cases = [
            (GatewayError::InvalidArgument("bad".into()), ErrorKind::InvalidRequest),
            (GatewayError::PermissionDenied("key".into()), ErrorKind::Credential),
            (GatewayError::ServiceUnavailable("503".into()), ErrorKind::Connection),
            (GatewayError::Timeout, ErrorKind::Connection),
            (GatewayError::Other("boom".into()), ErrorKind::Oracle),
        ];

        for (gateway_error, kind) in cases {
            let gateway = Arc::new(
                ScriptedGateway::new()
                    .script("KEY_A", vec![Err(gateway_error)])
                    .script("KEY_B", vec![Ok("unused")]),
            );
            let rotator = rotator(&["KEY_A", "KEY_B"]);
            let mut session = OracleSession::open(gateway.clone(), rotator.clone())
                .await
                .unwrap();

            let error = session.send("ask").await.unwrap_err();
            assert_eq!(error.kind(), kind);
            assert_eq!(gateway.prompts().len(), 1);
            assert_eq!(lock(&rotator).active_index(), 0);
        }
    }

    #[tokio::test]
    async fn test_open_fails_on_exhausted_rotator() {
        let rotator = rotator(&["KEY_A"]);
        let _ = lock(&rotator).mark_exhausted_and_advance();
        let gateway = Arc::new(ScriptedGateway::new());

        let error = OracleSession::open(gateway.clone(), rotator).await.err().unwrap();
        assert_eq!(error.kind(), ErrorKind::Quota);
        assert!(gateway.opened().is_empty());
    }

    #[tokio::test]
    async fn test_follows_rotation_done_by_another_session() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("KEY_A", vec![Err(quota())])
                .script("KEY_B", vec![Ok("Q")]),
        );
        let rotator = rotator(&["KEY_A", "KEY_B", "KEY_C"]);
        let mut session = OracleSession::open(gateway.clone(), rotator.clone())
            .await
            .unwrap();

        // A concurrent game already moved the shared rotator to KEY_B.
        lock(&rotator).mark_exhausted_and_advance().unwrap();

        assert_eq!(session.send("ask").await.unwrap(), "Q");
        assert_eq!(session.credential_name(), "KEY_B");
        assert_eq!(lock(&rotator).active_index(), 1);
    }
}

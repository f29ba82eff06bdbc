//! Scripted port implementations shared by the use case tests.

use crate::ports::oracle_gateway::{GatewayError, OracleConversation, OracleGateway};
use crate::ports::player::{Confirmation, InteractionError, PlayerPort, PlayerReply};
use crate::ports::transcript::{GameTranscript, TranscriptError, TranscriptSink};
use async_trait::async_trait;
use sleuth_domain::{Credential, Message};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// === Oracle ===

#[derive(Default)]
struct Script {
    replies: Mutex<HashMap<String, VecDeque<Result<String, GatewayError>>>>,
    fallback: Option<String>,
    opened: Mutex<Vec<(String, Vec<Message>)>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl Script {
    fn next_reply(&self, credential: &str, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((credential.to_string(), prompt.to_string()));
        let scripted = self
            .replies
            .lock()
            .unwrap()
            .get_mut(credential)
            .and_then(|queue| queue.pop_front());
        match (scripted, &self.fallback) {
            (Some(reply), _) => reply,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(GatewayError::Other(format!(
                "no scripted reply left for {}",
                credential
            ))),
        }
    }
}

/// Gateway whose replies are scripted per credential name.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    script: Arc<Script>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(reply: &str) -> Self {
        Self {
            script: Arc::new(Script {
                fallback: Some(reply.to_string()),
                ..Default::default()
            }),
        }
    }

    pub fn script(self, credential: &str, replies: Vec<Result<&str, GatewayError>>) -> Self {
        self.script.replies.lock().unwrap().insert(
            credential.to_string(),
            replies
                .into_iter()
                .map(|reply| reply.map(str::to_string))
                .collect(),
        );
        self
    }

    /// Every `open_session` call: credential name and seed history.
    pub fn opened(&self) -> Vec<(String, Vec<Message>)> {
        self.script.opened.lock().unwrap().clone()
    }

    /// Every prompt sent: credential name and prompt text.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.script.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OracleGateway for ScriptedGateway {
    async fn open_session(
        &self,
        credential: &Credential,
        history: Vec<Message>,
    ) -> Result<Box<dyn OracleConversation>, GatewayError> {
        self.script
            .opened
            .lock()
            .unwrap()
            .push((credential.name().to_string(), history.clone()));
        Ok(Box::new(ScriptedConversation {
            credential: credential.name().to_string(),
            script: self.script.clone(),
            history: Mutex::new(history),
        }))
    }
}

struct ScriptedConversation {
    credential: String,
    script: Arc<Script>,
    history: Mutex<Vec<Message>>,
}

#[async_trait]
impl OracleConversation for ScriptedConversation {
    fn credential_name(&self) -> &str {
        &self.credential
    }

    async fn send(&self, prompt: &str) -> Result<String, GatewayError> {
        let reply = self.script.next_reply(&self.credential, prompt)?;
        let mut history = self.history.lock().unwrap();
        history.push(Message::user(prompt));
        history.push(Message::model(reply.clone()));
        Ok(reply)
    }

    async fn history(&self) -> Vec<Message> {
        self.history.lock().unwrap().clone()
    }
}

// === Player ===

/// Player that replays scripted answers; answers "no" and rejects guesses
/// once the script runs out.
#[derive(Default)]
pub(crate) struct ScriptedPlayer {
    answers: Mutex<VecDeque<PlayerReply>>,
    confirmations: Mutex<VecDeque<Confirmation>>,
    revealed: Option<String>,
    pub answer_calls: Mutex<usize>,
    pub confirm_calls: Mutex<usize>,
    pub reveal_calls: Mutex<usize>,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(self, answers: Vec<PlayerReply>) -> Self {
        *self.answers.lock().unwrap() = answers.into();
        self
    }

    pub fn confirmations(self, confirmations: Vec<Confirmation>) -> Self {
        *self.confirmations.lock().unwrap() = confirmations.into();
        self
    }

    pub fn revealing(mut self, movie: &str) -> Self {
        self.revealed = Some(movie.to_string());
        self
    }
}

#[async_trait]
impl PlayerPort for ScriptedPlayer {
    async fn answer(
        &self,
        _question: &str,
        _round: usize,
        _max_rounds: usize,
    ) -> Result<PlayerReply, InteractionError> {
        *self.answer_calls.lock().unwrap() += 1;
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| PlayerReply::Answer("no".to_string())))
    }

    async fn confirm_guess(&self, _guess: &str) -> Result<Confirmation, InteractionError> {
        *self.confirm_calls.lock().unwrap() += 1;
        Ok(self
            .confirmations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Confirmation::No))
    }

    async fn reveal_movie(&self) -> Result<Option<String>, InteractionError> {
        *self.reveal_calls.lock().unwrap() += 1;
        Ok(self.revealed.clone())
    }
}

// === Transcript ===

/// Sink that keeps every transcript in memory, optionally failing.
#[derive(Default)]
pub(crate) struct RecordingTranscript {
    pub records: Mutex<Vec<GameTranscript>>,
    fail: bool,
}

impl RecordingTranscript {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl TranscriptSink for RecordingTranscript {
    fn record(&self, transcript: &GameTranscript) -> Result<(), TranscriptError> {
        if self.fail {
            return Err(TranscriptError::Io(std::io::Error::other("disk full")));
        }
        self.records.lock().unwrap().push(transcript.clone());
        Ok(())
    }
}

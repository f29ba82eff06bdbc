//! Play game use case
//!
//! Drives one game of twenty questions against the oracle:
//!
//! ```text
//! AwaitingQuestion ── oracle: question prompt ──▶ AwaitingAnswer
//! AwaitingAnswer   ── player: answer          ──▶ Guessing
//! Guessing         ── oracle: guess prompt
//!                     ├─ "need more questions" ──▶ next round / WonPlayer
//!                     └─ title ── player: confirm
//!                                  ├─ yes ──▶ WonAi
//!                                  └─ no  ──▶ next round / WonPlayer
//! ```
//!
//! Oracle failures end the game as `Aborted` and are returned as
//! [`GameFailure`]. Resolved games are handed to the transcript sink.

use crate::config::GameConfig;
use crate::error::SleuthError;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::oracle_gateway::OracleGateway;
use crate::ports::player::{Confirmation, PlayerPort, PlayerReply};
use crate::ports::progress::{GameProgressNotifier, ThinkingStep};
use crate::ports::transcript::{GameTranscript, NoTranscript, TranscriptSink};
use crate::use_cases::oracle_session::{OracleSession, SharedRotator};
use sleuth_domain::{GameError, GameOutcome, GameState, Phase, PromptTemplate, clean};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub state: GameState,
}

/// A game that ended because of an error. `state` is already `Aborted`.
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct GameFailure {
    pub error: SleuthError,
    pub state: GameState,
}

/// Use case for playing one game.
pub struct PlayGameUseCase {
    gateway: Arc<dyn OracleGateway>,
    rotator: SharedRotator,
    player: Arc<dyn PlayerPort>,
    transcript: Arc<dyn TranscriptSink>,
    conversation_logger: Arc<dyn ConversationLogger>,
    config: GameConfig,
}

impl PlayGameUseCase {
    pub fn new(
        gateway: Arc<dyn OracleGateway>,
        rotator: SharedRotator,
        player: Arc<dyn PlayerPort>,
    ) -> Self {
        Self {
            gateway,
            rotator,
            player,
            transcript: Arc::new(NoTranscript),
            conversation_logger: Arc::new(NoConversationLogger),
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptSink>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Play one game to a terminal state.
    pub async fn execute(
        &self,
        progress: &dyn GameProgressNotifier,
    ) -> Result<GameReport, GameFailure> {
        let mut state = GameState::new(self.config.max_rounds);
        info!("Starting game with {} rounds", state.max_rounds());

        match self.run(&mut state, progress).await {
            Ok(outcome) => {
                self.finish(&outcome, &state);
                Ok(GameReport { outcome, state })
            }
            Err(error) => {
                warn!("Game aborted at round {}: {}", state.round(), error);
                if !state.is_finished() {
                    let _ = state.abort();
                }
                self.conversation_logger.log(ConversationEvent::game_finished(
                    &GameOutcome::Aborted,
                    state.history(),
                ));
                Err(GameFailure { error, state })
            }
        }
    }

    async fn run(
        &self,
        state: &mut GameState,
        progress: &dyn GameProgressNotifier,
    ) -> Result<GameOutcome, SleuthError> {
        let mut session = OracleSession::open(self.gateway.clone(), self.rotator.clone())
            .await?
            .with_conversation_logger(self.conversation_logger.clone());
        let mut last_guess = String::new();

        loop {
            match state.phase() {
                Phase::AwaitingQuestion => {
                    let prompt = PromptTemplate::question_prompt(
                        state.history(),
                        state.max_rounds(),
                        state.remaining_rounds(),
                    );
                    let question =
                        Self::ask(&mut session, &prompt, ThinkingStep::Question, progress).await?;
                    debug!("Round {} question: {}", state.round(), question);
                    progress.on_question(state.round(), state.max_rounds(), &question);
                    state.pose_question(question)?;
                }
                Phase::AwaitingAnswer => {
                    let question = state.pending_question().unwrap_or_default().to_string();
                    let reply = self
                        .player
                        .answer(&question, state.round(), state.max_rounds())
                        .await?;
                    match reply {
                        PlayerReply::Exit => {
                            info!("Player left at round {}", state.round());
                            state.abort()?;
                        }
                        PlayerReply::Answer(answer) => match state.record_answer(&answer) {
                            Ok(_) => {}
                            Err(GameError::BlankAnswer) => debug!("Blank answer, asking again"),
                            Err(e) => return Err(e.into()),
                        },
                    }
                }
                Phase::Guessing => {
                    let prompt = PromptTemplate::guess_prompt(state.history());
                    let guess =
                        Self::ask(&mut session, &prompt, ThinkingStep::Guess, progress).await?;

                    if guess.is_empty() || PromptTemplate::is_not_confident(&guess) {
                        debug!("Oracle not confident at round {}", state.round());
                        progress.on_not_confident(state.round());
                        state.not_confident()?;
                        continue;
                    }

                    info!("Round {} guess: {}", state.round(), guess);
                    progress.on_guess(&guess);
                    match self.player.confirm_guess(&guess).await? {
                        Confirmation::Yes => {
                            state.guess_confirmed()?;
                        }
                        Confirmation::No => {
                            progress.on_guess_rejected(&guess);
                            state.guess_rejected()?;
                        }
                        Confirmation::Exit => {
                            state.abort()?;
                        }
                    }
                    last_guess = guess;
                }
                Phase::WonAi => {
                    return Ok(GameOutcome::AiWon { title: last_guess });
                }
                Phase::WonPlayer => {
                    let revealed = match self.player.reveal_movie().await {
                        Ok(revealed) => revealed,
                        Err(e) => {
                            warn!("Could not read the revealed movie: {}", e);
                            None
                        }
                    };
                    return Ok(GameOutcome::PlayerWon { revealed });
                }
                Phase::Aborted => return Ok(GameOutcome::Aborted),
            }
        }
    }

    /// Send one prompt and sanitize the reply.
    async fn ask(
        session: &mut OracleSession,
        prompt: &str,
        step: ThinkingStep,
        progress: &dyn GameProgressNotifier,
    ) -> Result<String, SleuthError> {
        progress.on_thinking_start(step);
        let result = session.send_with_progress(prompt, progress).await;
        progress.on_thinking_end();
        Ok(clean(&result?))
    }

    fn finish(&self, outcome: &GameOutcome, state: &GameState) {
        info!(
            "Game finished: {} ({} questions asked)",
            outcome.label(),
            state.questions_asked()
        );
        self.conversation_logger
            .log(ConversationEvent::game_finished(outcome, state.history()));

        if !outcome.is_resolved() {
            return;
        }
        let transcript = GameTranscript::new(
            outcome.clone(),
            state.questions_asked(),
            state.history().to_vec(),
        );
        if let Err(e) = self.transcript.record(&transcript) {
            warn!("Failed to record transcript: {}", e);
        }
    }
}

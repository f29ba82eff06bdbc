//! Game state machine.
//!
//! ```text
//!                  pose_question          record_answer
//! AwaitingQuestion ─────────────▶ AwaitingAnswer ─────────▶ Guessing
//!        ▲                                                     │
//!        │   not_confident / guess_rejected (round < max)      │
//!        └─────────────────────────────────────────────────────┤
//!                                                              ├─ guess_confirmed ──▶ WonAi
//!                  not_confident / guess_rejected (round == max)└────────────────────▶ WonPlayer
//!
//! abort(): any non-terminal phase ──▶ Aborted
//! ```
//!
//! `GameState` is pure bookkeeping; the use case decides when to talk to the
//! oracle and the player.

use super::DEFAULT_MAX_ROUNDS;
use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One asked-and-answered exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

impl Turn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// States of the guessing game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingQuestion,
    AwaitingAnswer,
    Guessing,
    WonAi,
    WonPlayer,
    Aborted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::AwaitingQuestion => "AwaitingQuestion",
            Phase::AwaitingAnswer => "AwaitingAnswer",
            Phase::Guessing => "Guessing",
            Phase::WonAi => "WonAi",
            Phase::WonPlayer => "WonPlayer",
            Phase::Aborted => "Aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::WonAi | Phase::WonPlayer | Phase::Aborted)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// History, round counter and phase of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    history: Vec<Turn>,
    round: usize,
    max_rounds: usize,
    phase: Phase,
    pending_question: Option<String>,
    questions_asked: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl GameState {
    /// Fresh game at round 1. A budget of zero is raised to one.
    pub fn new(max_rounds: usize) -> Self {
        Self {
            history: Vec::new(),
            round: 1,
            max_rounds: max_rounds.max(1),
            phase: Phase::AwaitingQuestion,
            pending_question: None,
            questions_asked: 0,
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Question waiting for an answer, if any.
    pub fn pending_question(&self) -> Option<&str> {
        self.pending_question.as_deref()
    }

    /// Number of question prompts issued so far.
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    /// Questions left including the current round.
    pub fn remaining_rounds(&self) -> usize {
        self.max_rounds.saturating_sub(self.round).saturating_add(1)
    }

    pub fn is_last_round(&self) -> bool {
        self.round >= self.max_rounds
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// AwaitingQuestion → AwaitingAnswer.
    pub fn pose_question(&mut self, question: impl Into<String>) -> Result<(), GameError> {
        self.expect_phase(Phase::AwaitingQuestion, "pose a question")?;
        self.pending_question = Some(question.into());
        self.questions_asked += 1;
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// AwaitingAnswer → Guessing. Blank answers are rejected and leave the
    /// state untouched.
    pub fn record_answer(&mut self, answer: &str) -> Result<&Turn, GameError> {
        self.expect_phase(Phase::AwaitingAnswer, "record an answer")?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(GameError::BlankAnswer);
        }
        let question = self.pending_question.take().unwrap_or_default();
        self.history.push(Turn::new(question, answer));
        self.phase = Phase::Guessing;
        Ok(&self.history[self.history.len() - 1])
    }

    /// Guessing → AwaitingQuestion, or WonPlayer on the last round.
    pub fn not_confident(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Phase::Guessing, "skip a guess")?;
        Ok(self.next_round_or_player_wins())
    }

    /// Guessing → WonAi.
    pub fn guess_confirmed(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Phase::Guessing, "confirm a guess")?;
        self.phase = Phase::WonAi;
        Ok(self.phase)
    }

    /// Guessing → AwaitingQuestion, or WonPlayer on the last round.
    pub fn guess_rejected(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Phase::Guessing, "reject a guess")?;
        Ok(self.next_round_or_player_wins())
    }

    /// Any non-terminal phase → Aborted.
    pub fn abort(&mut self) -> Result<(), GameError> {
        if self.phase.is_terminal() {
            return Err(GameError::InvalidTransition {
                action: "abort",
                phase: self.phase.as_str(),
            });
        }
        self.pending_question = None;
        self.phase = Phase::Aborted;
        Ok(())
    }

    fn next_round_or_player_wins(&mut self) -> Phase {
        if self.is_last_round() {
            self.phase = Phase::WonPlayer;
        } else {
            self.round += 1;
            self.phase = Phase::AwaitingQuestion;
        }
        self.phase
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                phase: self.phase.as_str(),
            })
        }
    }
}

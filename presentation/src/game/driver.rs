//! Interactive game session.
//!
//! ```text
//! banner → "start"/"exit" → game → outcome → "Play again?" ─┐
//!                             ▲                              │ yes
//!                             └──────────────────────────────┘
//! ```
//!
//! Every game gets a fresh state and oracle session. The credential rotator
//! is shared across games and only rewound when `reset_between_games` is on.

use crate::interaction::console_player::ConsolePlayer;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use sleuth_application::ports::player::{Confirmation, InteractionError};
use sleuth_application::ports::progress::{GameProgressNotifier, NoGameProgress};
use sleuth_application::{ErrorKind, PlayGameUseCase, SharedRotator};
use sleuth_domain::{DEFAULT_MAX_ROUNDS, GameOutcome};
use std::io::BufRead;
use std::sync::{Arc, PoisonError};
use tracing::info;

/// Tally of one interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ai_wins: usize,
    pub player_wins: usize,
    pub aborted: usize,
    pub failed: usize,
}

impl SessionSummary {
    pub fn games_played(&self) -> usize {
        self.ai_wins + self.player_wins + self.aborted + self.failed
    }

    fn record(&mut self, outcome: &GameOutcome) {
        match outcome {
            GameOutcome::AiWon { .. } => self.ai_wins += 1,
            GameOutcome::PlayerWon { .. } => self.player_wins += 1,
            GameOutcome::Aborted => self.aborted += 1,
        }
    }
}

/// Runs games until the player stops.
pub struct GameDriver<R> {
    use_case: PlayGameUseCase,
    console: Arc<ConsolePlayer<R>>,
    rotator: SharedRotator,
    progress: Box<dyn GameProgressNotifier>,
    reset_between_games: bool,
    max_rounds: usize,
}

impl<R: BufRead + Send + 'static> GameDriver<R> {
    /// `console` should be the same player the use case talks to, so all
    /// prompts read from one input.
    pub fn new(
        use_case: PlayGameUseCase,
        console: Arc<ConsolePlayer<R>>,
        rotator: SharedRotator,
    ) -> Self {
        Self {
            use_case,
            console,
            rotator,
            progress: Box::new(NoGameProgress),
            reset_between_games: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn GameProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_reset_between_games(mut self, reset: bool) -> Self {
        self.reset_between_games = reset;
        self
    }

    /// Question budget shown on the start screen.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub async fn run(&self) -> Result<SessionSummary, InteractionError> {
        let mut summary = SessionSummary::default();
        println!("{}", ConsoleFormatter::banner(self.max_rounds));

        if !self.wait_for_start()? {
            println!("{}", ConsoleFormatter::goodbye());
            return Ok(summary);
        }

        loop {
            if self.reset_between_games && summary.games_played() > 0 {
                self.rotator
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .reset();
                info!("Credential rotation reset for a new game");
            }

            match self.use_case.execute(self.progress.as_ref()).await {
                Ok(report) => {
                    println!("{}", ConsoleFormatter::outcome(&report.outcome));
                    summary.record(&report.outcome);
                }
                Err(failure) => {
                    println!("{}", ConsoleFormatter::error(&failure.error));
                    summary.failed += 1;
                    if !self.can_recover(failure.error.kind()) {
                        break;
                    }
                }
            }

            if self.console.ask_yes_no("\nPlay again? (yes/no): ")? != Confirmation::Yes {
                break;
            }
        }

        println!("{}", ConsoleFormatter::goodbye());
        Ok(summary)
    }

    /// `true` once the player types `start`; `false` on `exit` or end of input.
    fn wait_for_start(&self) -> Result<bool, InteractionError> {
        loop {
            let Some(line) = self
                .console
                .prompt_line("Type 'start' to begin or 'exit' to quit: ")?
            else {
                return Ok(false);
            };
            match line.trim().to_lowercase().as_str() {
                "start" => return Ok(true),
                "exit" => return Ok(false),
                _ => println!("{}", "Please type 'start' or 'exit'.".yellow()),
            }
        }
    }

    /// Whether another game could succeed after a failure of this kind.
    fn can_recover(&self, kind: ErrorKind) -> bool {
        match kind {
            ErrorKind::Credential => false,
            ErrorKind::Quota => {
                self.reset_between_games
                    || !self
                        .rotator
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .is_exhausted()
            }
            _ => true,
        }
    }
}

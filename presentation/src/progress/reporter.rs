//! Progress reporting while the oracle thinks

use crate::output::console::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use sleuth_application::ports::progress::{GameProgressNotifier, ThinkingStep};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn thinking_message(step: ThinkingStep) -> &'static str {
    match step {
        ThinkingStep::Question => "AI is thinking...",
        ThinkingStep::Guess => "AI is analyzing...",
    }
}

/// Shows a spinner during oracle calls and prints questions and guesses
pub struct GameProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl GameProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear(&self) {
        if let Some(pb) = self.slot().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for GameProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgressNotifier for GameProgressReporter {
    fn on_thinking_start(&self, step: ThinkingStep) {
        self.clear();
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(thinking_message(step));
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.slot() = Some(pb);
    }

    fn on_thinking_end(&self) {
        self.clear();
    }

    fn on_question(&self, round: usize, max_rounds: usize, question: &str) {
        println!("{}", ConsoleFormatter::question(round, max_rounds, question));
    }

    fn on_guess(&self, guess: &str) {
        println!("{}", ConsoleFormatter::guess(guess));
    }

    fn on_guess_rejected(&self, _guess: &str) {
        println!("{}", ConsoleFormatter::guess_rejected());
    }

    fn on_credential_rotated(&self, _from: &str, to: &str) {
        match self.slot().as_ref() {
            Some(pb) => pb.println(ConsoleFormatter::credential_rotated(to)),
            None => println!("{}", ConsoleFormatter::credential_rotated(to)),
        }
    }
}

/// Plain text progress (no spinner), for `--quiet` and non-TTY use
pub struct SimpleGameProgress;

impl GameProgressNotifier for SimpleGameProgress {
    fn on_question(&self, round: usize, max_rounds: usize, question: &str) {
        println!("{}", ConsoleFormatter::question(round, max_rounds, question));
    }

    fn on_guess(&self, guess: &str) {
        println!("{}", ConsoleFormatter::guess(guess));
    }

    fn on_guess_rejected(&self, _guess: &str) {
        println!("{}", ConsoleFormatter::guess_rejected());
    }

    fn on_credential_rotated(&self, _from: &str, to: &str) {
        println!("{}", ConsoleFormatter::credential_rotated(to));
    }
}

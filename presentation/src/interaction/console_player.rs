//! Terminal player.
//!
//! Reads answers, confirmations and the revealed title from a line-based
//! input (stdin in the binary, an in-memory buffer in tests).
//!
//! | Prompt | Accepted input |
//! |--------|----------------|
//! | question | any non-blank text, `exit` |
//! | guess confirmation | `yes`/`y`, `no`/`n`, `exit` |
//! | reveal | any text; blank declines |
//!
//! End of input or a read error always counts as `exit`.

use async_trait::async_trait;
use colored::Colorize;
use sleuth_application::ports::player::{
    Confirmation, InteractionError, PlayerPort, PlayerReply,
};
use std::io::{self, BufRead, BufReader, Stdin, Write};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Parse a confirmation; `None` means "ask again".
pub fn parse_confirmation(input: &str) -> Option<Confirmation> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(Confirmation::Yes),
        "no" | "n" => Some(Confirmation::No),
        "exit" => Some(Confirmation::Exit),
        _ => None,
    }
}

/// Normalize an answer: trimmed and lower-cased. `exit` leaves the game.
pub fn parse_answer(input: &str) -> PlayerReply {
    let answer = input.trim().to_lowercase();
    if answer == "exit" {
        PlayerReply::Exit
    } else {
        PlayerReply::Answer(answer)
    }
}

/// Player backed by a line reader.
pub struct ConsolePlayer<R> {
    input: Mutex<R>,
}

impl ConsolePlayer<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead + Send> ConsolePlayer<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }

    /// Print `prompt` and read one line. `Ok(None)` on end of input or a
    /// read error.
    pub fn prompt_line(&self, prompt: &str) -> Result<Option<String>, InteractionError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| InteractionError::Io(format!("Failed to flush stdout: {}", e)))?;

        let mut line = String::new();
        let mut input = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        match input.read_line(&mut line) {
            Ok(0) => {
                println!();
                Ok(None)
            }
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) => {
                warn!("Failed to read input: {}", e);
                Ok(None)
            }
        }
    }

    /// Ask until the player types yes, no or exit.
    pub fn ask_yes_no(&self, prompt: &str) -> Result<Confirmation, InteractionError> {
        loop {
            let Some(line) = self.prompt_line(prompt)? else {
                return Ok(Confirmation::Exit);
            };
            match parse_confirmation(&line) {
                Some(confirmation) => return Ok(confirmation),
                None => println!("{}", "Please answer 'yes', 'no', or 'exit'.".yellow()),
            }
        }
    }
}

#[async_trait]
impl<R: BufRead + Send> PlayerPort for ConsolePlayer<R> {
    async fn answer(
        &self,
        _question: &str,
        _round: usize,
        _max_rounds: usize,
    ) -> Result<PlayerReply, InteractionError> {
        loop {
            let Some(line) = self.prompt_line("Your Answer (yes/no or type 'exit' to quit): ")?
            else {
                return Ok(PlayerReply::Exit);
            };
            match parse_answer(&line) {
                PlayerReply::Answer(answer) if answer.is_empty() => {
                    println!("{}", "Please type an answer.".yellow());
                }
                reply => return Ok(reply),
            }
        }
    }

    async fn confirm_guess(&self, _guess: &str) -> Result<Confirmation, InteractionError> {
        self.ask_yes_no("\nIs this correct? (yes/no): ")
    }

    async fn reveal_movie(&self) -> Result<Option<String>, InteractionError> {
        let line = self.prompt_line("What movie were you thinking of? ")?;
        Ok(line
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty()))
    }
}

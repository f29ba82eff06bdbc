//! Human interaction surfaces

pub mod console_player;

pub use console_player::{ConsolePlayer, parse_answer, parse_confirmation};

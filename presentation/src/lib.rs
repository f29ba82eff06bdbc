//! Presentation layer for cine-sleuth
//!
//! This crate contains the CLI definition, the terminal player, console
//! output, the thinking spinner and the interactive game loop.

pub mod cli;
pub mod game;
pub mod interaction;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use game::{GameDriver, SessionSummary};
pub use interaction::ConsolePlayer;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{GameProgressReporter, SimpleGameProgress};

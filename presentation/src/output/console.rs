//! Console text for the game

use colored::Colorize;
use sleuth_application::SleuthError;
use sleuth_domain::GameOutcome;

/// Formats game events for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Start screen
    pub fn banner(max_rounds: usize) -> String {
        let border = format!("+{}+", "-".repeat(68));
        let mut output = String::new();
        output.push_str(&format!("{}\n", border.cyan()));
        output.push_str(&format!(
            "|{}|\n",
            Self::center("Welcome to Cine-Sleuth!", 68).bold()
        ));
        output.push_str(&format!(
            "|{}|\n",
            Self::center("Your AI-powered movie detector", 68)
        ));
        output.push_str(&format!("{}\n\n", border.cyan()));
        output.push_str(&format!(
            "  I will ask up to {} questions to guess the movie you're thinking of.\n",
            max_rounds
        ));
        output
    }

    /// Which credentials were found, names only
    pub fn credentials_loaded(names: &[&str]) -> String {
        let backups = names.len().saturating_sub(1);
        format!(
            "{} Loaded {} API key(s): {}{}",
            "✓".green(),
            names.len(),
            names.join(", ").dimmed(),
            if backups > 0 {
                format!(" ({} backup)", backups)
            } else {
                String::new()
            }
        )
    }

    pub fn question(round: usize, max_rounds: usize, question: &str) -> String {
        format!(
            "\n{} {}",
            format!("AI Question {}/{}:", round, max_rounds).cyan().bold(),
            question
        )
    }

    pub fn guess(guess: &str) -> String {
        format!("\n{} {}", "I think your movie:".magenta().bold(), guess.bold())
    }

    pub fn guess_rejected() -> String {
        "Hmm, maybe I need more questions...".dimmed().to_string()
    }

    pub fn credential_rotated(to: &str) -> String {
        format!("{} Switched to backup API key {}", "↻".yellow(), to.dimmed())
    }

    /// End-of-game message
    pub fn outcome(outcome: &GameOutcome) -> String {
        match outcome {
            GameOutcome::AiWon { title } => format!(
                "\n{} {}",
                "🎉 I guessed it!".green().bold(),
                format!("It was {}. Thanks for playing!", title)
            ),
            GameOutcome::PlayerWon { revealed } => {
                let mut output = format!(
                    "\n{}",
                    "🤔 I couldn't guess your movie. You win this time!"
                        .yellow()
                        .bold()
                );
                if let Some(title) = revealed {
                    output.push_str(&format!("\nI'll remember {} next time.", title.bold()));
                }
                output
            }
            GameOutcome::Aborted => format!("\n{}", "Thanks for playing!".dimmed()),
        }
    }

    /// A game-ending error with its category label
    pub fn error(error: &SleuthError) -> String {
        format!(
            "{} {} {}",
            "❌".red(),
            format!("{}:", error.kind().label()).red().bold(),
            error
        )
    }

    pub fn goodbye() -> String {
        "👋 Goodbye!".to_string()
    }

    fn center(text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            return text.to_string();
        }
        let left = (width - len) / 2;
        format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pads_to_width() {
        let centered = ConsoleFormatter::center("Welcome", 11);
        assert_eq!(centered, "  Welcome  ");
        assert_eq!(ConsoleFormatter::center("too long", 3), "too long");
    }

    #[test]
    fn test_error_carries_kind_label() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::error(&SleuthError::QuotaExhausted("all keys".to_string()));
        assert_eq!(text, "❌ Quota Error: all keys");
    }

    #[test]
    fn test_credentials_loaded_lists_names_only() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::credentials_loaded(&["GEMINI_API_KEY", "GEMINI_API_KEY_1"]);
        assert_eq!(
            text,
            "✓ Loaded 2 API key(s): GEMINI_API_KEY, GEMINI_API_KEY_1 (1 backup)"
        );
    }

    #[test]
    fn test_player_win_mentions_revealed_title() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::outcome(&GameOutcome::PlayerWon {
            revealed: Some("Heat".to_string()),
        });
        assert!(text.contains("You win this time!"));
        assert!(text.contains("Heat"));
    }
}

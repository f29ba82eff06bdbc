//! Prompt templates for the guessing game

use crate::game::state::Turn;

/// Phrase the oracle is told to emit instead of a guess.
pub const NOT_CONFIDENT_PHRASE: &str = "I need more questions";

/// Case-insensitive marker searched for in guess replies.
const NOT_CONFIDENT_MARKER: &str = "need more questions";

/// Movie attributes the oracle is steered towards when narrowing down.
const ATTRIBUTE_CHECKLIST: &[&str] = &[
    "genre",
    "time period / release year",
    "actors and actresses",
    "director",
    "franchise vs standalone",
    "setting",
    "main character (male or female lead)",
    "plot elements and famous scenes",
    "themes & tone",
    "cinematography style",
    "popularity",
];

/// Templates for generating prompts at each step
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking for the next narrowing question.
    pub fn question_prompt(history: &[Turn], max_rounds: usize, remaining: usize) -> String {
        let mut prompt = format!(
            r#"You are a movie-detective AI playing a guessing game.
The user is thinking of a movie.

Previous Q&A so far:
{}

You have only {} questions in total and {} question(s) remaining.
You must guess the movie within these questions.
Mostly focus on the last Q&A in the history to narrow down.

Ask ONE question to narrow down the movie, about its:
"#,
            Self::summary(history),
            max_rounds,
            remaining
        );

        for attribute in ATTRIBUTE_CHECKLIST {
            prompt.push_str(&format!("- {}\n", attribute));
        }

        prompt.push_str("\nOutput only the question.");
        prompt
    }

    /// Prompt asking for a title guess or the not-confident phrase.
    pub fn guess_prompt(history: &[Turn]) -> String {
        format!(
            r#"Based on the following Q&A:
{}

Guess the movie the user is thinking of based on the provided information.
Mostly focus on the last Q&A in the history to narrow down and guess the movie.
If not confident, say '{}'. Output only the movie title or the phrase."#,
            Self::summary(history),
            NOT_CONFIDENT_PHRASE
        )
    }

    /// One `Q: .. A: ..` line per turn, or `None` for an empty history.
    pub fn summary(history: &[Turn]) -> String {
        if history.is_empty() {
            return "None".to_string();
        }
        history
            .iter()
            .map(|turn| format!("Q: {} A: {}", turn.question, turn.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether a guess reply is the not-confident sentinel.
    ///
    /// This is a plain substring test, so a title that happens to contain the
    /// phrase is also read as "not confident".
    pub fn is_not_confident(reply: &str) -> bool {
        reply.to_lowercase().contains(NOT_CONFIDENT_MARKER)
    }
}

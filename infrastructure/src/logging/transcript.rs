//! Plain-text transcript sink.
//!
//! Appends one block per finished game:
//!
//! ```text
//!
//! ==================================================
//! Date: 2024-05-01 20:14:03
//! Movie: Groundhog Day
//! Result: AI Won
//! Questions Asked: 3
//! ------------------------------
//! Q: Is it animated?
//! A: no
//!
//! ```

use sleuth_application::ports::transcript::{GameTranscript, TranscriptError, TranscriptSink};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Appends transcripts to a text file, creating parent directories on demand.
pub struct TextTranscriptSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TextTranscriptSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render one transcript block.
    pub fn render(transcript: &GameTranscript) -> String {
        let mut block = String::new();
        let _ = writeln!(block);
        let _ = writeln!(block, "{}", "=".repeat(50));
        let _ = writeln!(
            block,
            "Date: {}",
            transcript.finished_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(block, "Movie: {}", transcript.movie());
        let _ = writeln!(block, "Result: {}", transcript.outcome.label());
        let _ = writeln!(block, "Questions Asked: {}", transcript.questions_asked);
        let _ = writeln!(block, "{}", "-".repeat(30));
        for turn in &transcript.history {
            let _ = writeln!(block, "Q: {}\nA: {}\n", turn.question, turn.answer);
        }
        block
    }
}

impl TranscriptSink for TextTranscriptSink {
    fn record(&self, transcript: &GameTranscript) -> Result<(), TranscriptError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(Self::render(transcript).as_bytes())?;

        debug!("Transcript appended to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_domain::{GameOutcome, Turn};

    fn transcript(outcome: GameOutcome) -> GameTranscript {
        GameTranscript::new(
            outcome,
            2,
            vec![
                Turn::new("Is it animated?", "no"),
                Turn::new("Is it set in space?", "yes"),
            ],
        )
    }

    #[test]
    fn test_render_matches_log_layout() {
        let block = TextTranscriptSink::render(&transcript(GameOutcome::AiWon {
            title: "Alien".to_string(),
        }));
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(50));
        assert!(lines[2].starts_with("Date: "));
        assert_eq!(lines[3], "Movie: Alien");
        assert_eq!(lines[4], "Result: AI Won");
        assert_eq!(lines[5], "Questions Asked: 2");
        assert_eq!(lines[6], "-".repeat(30));
        assert_eq!(lines[7], "Q: Is it animated?");
        assert_eq!(lines[8], "A: no");
        assert_eq!(lines[9], "");
        assert_eq!(lines[10], "Q: Is it set in space?");
    }

    #[test]
    fn test_unrevealed_player_win_is_unresolved() {
        let block =
            TextTranscriptSink::render(&transcript(GameOutcome::PlayerWon { revealed: None }));
        assert!(block.contains("Movie: unresolved\nResult: Player Won\n"));
    }

    #[test]
    fn test_record_appends_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("log.txt");
        let sink = TextTranscriptSink::new(&path);

        sink.record(&transcript(GameOutcome::AiWon {
            title: "Alien".to_string(),
        }))
        .unwrap();
        sink.record(&transcript(GameOutcome::PlayerWon {
            revealed: Some("Heat".to_string()),
        }))
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(&"=".repeat(50)).count(), 2);
        assert!(content.contains("Movie: Alien"));
        assert!(content.contains("Movie: Heat"));
    }

    #[test]
    fn test_record_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let sink = TextTranscriptSink::new(blocker.join("log.txt"));
        let result = sink.record(&transcript(GameOutcome::AiWon {
            title: "Alien".to_string(),
        }));
        assert!(matches!(result, Err(TranscriptError::Io(_))));
    }
}

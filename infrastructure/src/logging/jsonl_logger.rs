//! JSONL conversation log.
//!
//! One line per [`ConversationEvent`], stamped with the time it was written:
//!
//! ```text
//! {"timestamp":"2025-01-01T12:00:00.000Z","type":"oracle_prompt","credential":"GEMINI_API_KEY",...}
//! ```
//!
//! The file is opened in append mode, so several sessions share one log.

use serde::Serialize;
use sleuth_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

#[derive(Serialize)]
struct LogRecord<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a ConversationEvent,
}

/// Appends conversation events to a JSONL file.
///
/// Each event is flushed as soon as it is written so a crash mid-game keeps
/// everything logged so far. The first write failure is reported with
/// `warn!`; later ones are dropped quietly.
pub struct JsonlConversationLogger {
    writer: Mutex<Box<dyn Write + Send>>,
    path: PathBuf,
    failed: AtomicBool,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    /// Returns `None` if that fails.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self::from_writer(BufWriter::new(file), path)),
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    fn from_writer(writer: impl Write + Send + 'static, path: &Path) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            path: path.to_path_buf(),
            failed: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once a write to the log has failed.
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    fn write_record(&self, event: &ConversationEvent) -> io::Result<()> {
        let record = LogRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event,
        };
        let line = serde_json::to_string(&record)?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        match self.write_record(&event) {
            Ok(()) => debug!("Logged {} event", event.kind()),
            Err(e) => {
                if !self.failed.swap(true, Ordering::Relaxed) {
                    warn!(
                        "Could not write {} event to {}: {}",
                        event.kind(),
                        self.path.display(),
                        e
                    );
                }
            }
        }
    }
}

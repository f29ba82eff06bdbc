//! Logging infrastructure: structured conversation logs and game transcripts.
//!
//! - [`JsonlConversationLogger`] implements the
//!   [`ConversationLogger`](sleuth_application::ConversationLogger) port.
//! - [`TextTranscriptSink`] implements the
//!   [`TranscriptSink`](sleuth_application::TranscriptSink) port.

mod jsonl_logger;
mod transcript;

pub use jsonl_logger::JsonlConversationLogger;
pub use transcript::TextTranscriptSink;

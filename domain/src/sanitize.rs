//! Output sanitizer.
//!
//! Oracle replies often carry lightweight markdown. [`clean`] strips it down
//! to plain display text with an ordered sequence of passes:
//!
//! 1. bold (`**x**`, `__x__`) → `x`
//! 2. italic (`*x*`, `_x_`) → `x`
//! 3. fenced code blocks → removed entirely
//! 4. inline code (`` `x` ``) → `x`
//! 5. heading markers (1-6 `#` then whitespace) at line start → removed
//! 6. 3+ newlines → exactly 2
//! 7. trim
//!
//! Order matters: emphasis is unwrapped before fences are dropped, and fences
//! are dropped before inline code and headings are handled.

use crate::core::error::SanitizeError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static BOLD_ASTERISK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_ASTERISK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.+?)_").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[\s\S]*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
static EXTRA_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip markup from oracle output.
///
/// The pass sequence is repeated until the text stops changing. Every pass
/// only removes characters, so this terminates, and the result is a fixed
/// point: `clean(clean(x)) == clean(x)`.
///
/// # Examples
///
/// ```
/// use sleuth_domain::sanitize::clean;
///
/// assert_eq!(clean("## **Inception** (2010)\n\n\n\n`sci-fi`"), "Inception (2010)\n\nsci-fi");
/// ```
pub fn clean(text: &str) -> String {
    let mut current = single_pass(text);
    loop {
        let next = single_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Sanitize an untyped value as received from an oracle payload.
///
/// Only JSON strings are accepted; anything else is rejected rather than
/// coerced to text.
pub fn clean_value(value: &Value) -> Result<String, SanitizeError> {
    match value {
        Value::String(text) => Ok(clean(text)),
        Value::Null => Err(SanitizeError::InvalidInput("null")),
        Value::Bool(_) => Err(SanitizeError::InvalidInput("a boolean")),
        Value::Number(_) => Err(SanitizeError::InvalidInput("a number")),
        Value::Array(_) => Err(SanitizeError::InvalidInput("an array")),
        Value::Object(_) => Err(SanitizeError::InvalidInput("an object")),
    }
}

fn single_pass(text: &str) -> String {
    let text = BOLD_ASTERISK.replace_all(text, "$1");
    let text = BOLD_UNDERSCORE.replace_all(&text, "$1");
    let text = ITALIC_ASTERISK.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

//! Conversation title resolution.

use chrono::{DateTime, Utc};

use compass_types::llm::{Message, MessageRole};

/// Maximum number of characters taken from the first user message.
pub const TITLE_MAX_CHARS: usize = 50;

/// Derive a title from the first user message: its first 50 characters
/// followed by an ellipsis. Returns `None` when there is no non-blank user
/// message.
pub fn derive_title(messages: &[Message]) -> Option<String> {
    let first = messages
        .iter()
        .find(|m| m.role == MessageRole::User && !m.content.trim().is_empty())?;
    let prefix: String = first.content.trim().chars().take(TITLE_MAX_CHARS).collect();
    Some(format!("{prefix}..."))
}

/// Pick the title for a conversation being saved.
///
/// An explicit non-blank title wins; otherwise the title is derived from the
/// first user message; otherwise it falls back to `Chat <YYYY-MM-DD>`.
pub fn resolve_title(explicit: Option<&str>, messages: &[Message], now: DateTime<Utc>) -> String {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    derive_title(messages).unwrap_or_else(|| format!("Chat {}", now.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_explicit_title_wins() {
        let messages = vec![Message::user("What careers suit me?")];
        assert_eq!(resolve_title(Some("Test"), &messages, now()), "Test");
    }

    #[test]
    fn test_blank_explicit_title_is_ignored() {
        let messages = vec![Message::user("Hi")];
        assert_eq!(resolve_title(Some("   "), &messages, now()), "Hi...");
    }

    #[test]
    fn test_derived_title_truncates_to_fifty_chars() {
        let long = "a".repeat(80);
        let title = derive_title(&[Message::user(long)]).unwrap();
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_derived_title_counts_chars_not_bytes() {
        let text = "é".repeat(60);
        let title = derive_title(&[Message::user(text)]).unwrap();
        assert_eq!(title, format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_derived_title_skips_assistant_messages() {
        let messages = vec![
            Message::assistant("Welcome! How can I help?"),
            Message::user("Tell me about nursing"),
        ];
        assert_eq!(derive_title(&messages).unwrap(), "Tell me about nursing...");
    }

    #[test]
    fn test_fallback_uses_date() {
        let messages = vec![Message::assistant("Hello")];
        assert_eq!(resolve_title(None, &messages, now()), "Chat 2024-03-09");
    }
}

//! Chat history types: session identifiers, user records, saved
//! conversations and their messages.
//!
//! A session identifier is an opaque, client-generated string that correlates
//! saved history without a login. The server maps it lazily to a user record;
//! conversations hang off that user record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::HistoryError;
pub use crate::llm::MessageRole;

/// Opaque client session identifier.
///
/// Never validated beyond being non-blank: it is a correlation key, not a
/// security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Parse a session identifier, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, HistoryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HistoryError::InvalidInput("Session ID required".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Synthesize a fresh identifier: `session_<unix-millis>_<9 base36 chars>`.
    ///
    /// The suffix comes from the random bits of a UUID v7, so collisions are
    /// only probabilistically avoided.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let mut bits = Uuid::now_v7().as_u128() & ((1u128 << 62) - 1);
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        for _ in 0..SUFFIX_LEN {
            let digit = (bits % 36) as u32;
            bits /= 36;
            suffix.push(char::from_digit(digit, 36).unwrap_or('0'));
        }
        Self(format!("session_{millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const SUFFIX_LEN: usize = 9;

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Internal identifier of a user record, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a saved conversation, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One user row per session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

/// A saved, titled sequence of chat messages.
///
/// Serialized without `user_id`: the owning user is implied by the session
/// the history was requested for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(skip_serializing, default)]
    pub user_id: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ordered by `created_at` ascending.
    pub messages: Vec<ConversationMessage>,
}

/// A single stored message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

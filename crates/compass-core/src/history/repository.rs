//! HistoryRepository trait definition.
//!
//! Maps a session identifier to a user record and that user's conversations.
//! Follows the RPITIT pattern used by every repository port in this crate.

use compass_types::error::RepositoryError;
use compass_types::history::{
    Conversation, ConversationId, ConversationMessage, SessionId, UserId, UserRecord,
};

/// Repository trait for chat history persistence.
///
/// Implementations live in compass-infra (e.g., `SqliteHistoryRepository`).
pub trait HistoryRepository: Send + Sync {
    /// Look up the user record for a session without creating one.
    fn find_user(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<UserRecord>, RepositoryError>> + Send;

    /// Look up the user record for a session, inserting it on first access.
    ///
    /// Idempotent: repeated calls for one session return the same record.
    fn find_or_create_user(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<UserRecord, RepositoryError>> + Send;

    /// All conversations for a user with nested messages, most recently
    /// updated first. Messages within a conversation are oldest first.
    fn list_conversations(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Insert a conversation together with its messages in one transaction.
    ///
    /// Either the conversation and every message are stored, or nothing is.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Bulk-insert messages into an existing conversation and bump its
    /// `updated_at`, scoped to its owner.
    ///
    /// Returns `NotFound` if the conversation does not exist or belongs to
    /// another user; nothing is written in that case.
    fn append_messages(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
        messages: &[ConversationMessage],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete one conversation, scoped to its owner.
    ///
    /// Returns whether a row was removed; a conversation owned by another
    /// user is left untouched.
    fn delete_conversation(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete every conversation of a user. The user record is kept.
    fn delete_all_conversations(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}

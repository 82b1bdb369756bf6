//! Conversation persistence service.
//!
//! HistoryService turns session-scoped requests (load, save, delete) into
//! repository calls: it resolves the session to a user record, validates the
//! payload, picks a title and builds typed records before writing.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use compass_types::error::{HistoryError, RepositoryError};
use compass_types::history::{
    Conversation, ConversationId, ConversationMessage, SessionId, UserRecord,
};
use compass_types::llm::{Message, MessageRole};

use super::repository::HistoryRepository;
use super::title::resolve_title;

/// Which conversations a delete request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    One(ConversationId),
    All,
}

/// Session-scoped create/read/delete over saved conversations.
///
/// Generic over `HistoryRepository` so compass-core never depends on
/// compass-infra.
pub struct HistoryService<R: HistoryRepository> {
    repo: R,
}

impl<R: HistoryRepository> HistoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// All conversations for a session, most recently updated first.
    ///
    /// Creates the user record on first access, so an unknown session gets
    /// an empty history rather than an error.
    #[tracing::instrument(name = "load_history", skip(self), fields(session_id = %session_id))]
    pub async fn load_history(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Conversation>, HistoryError> {
        let user = self.repo.find_or_create_user(session_id).await?;
        let conversations = self.repo.list_conversations(&user.id).await?;
        debug!(count = conversations.len(), "Loaded history");
        Ok(conversations)
    }

    /// Save a completed exchange as a new conversation.
    ///
    /// Rejects an empty message list and system-role messages. The
    /// conversation and its messages are written atomically.
    #[tracing::instrument(
        name = "save_conversation",
        skip(self, messages, title),
        fields(session_id = %session_id, message_count = messages.len())
    )]
    pub async fn save_conversation(
        &self,
        session_id: &SessionId,
        messages: &[Message],
        title: Option<&str>,
    ) -> Result<Conversation, HistoryError> {
        validate_messages(messages)?;

        let user = self.repo.find_or_create_user(session_id).await?;
        let now = Utc::now();
        let conversation_id = ConversationId::new();

        let conversation = Conversation {
            id: conversation_id,
            user_id: user.id,
            title: resolve_title(title, messages, now),
            created_at: now,
            updated_at: now,
            messages: to_records(conversation_id, messages, now),
        };

        self.repo.create_conversation(&conversation).await?;
        info!(
            conversation_id = %conversation.id,
            title = %conversation.title,
            "Conversation saved"
        );
        Ok(conversation)
    }

    /// Append further messages to a conversation owned by this session.
    ///
    /// Used when a conversation that was already saved keeps going.
    #[tracing::instrument(
        name = "append_messages",
        skip(self, messages),
        fields(session_id = %session_id, conversation_id = %conversation_id)
    )]
    pub async fn append_messages(
        &self,
        session_id: &SessionId,
        conversation_id: &ConversationId,
        messages: &[Message],
    ) -> Result<(), HistoryError> {
        validate_messages(messages)?;

        let user = self.owner(session_id).await?;
        let records = to_records(*conversation_id, messages, Utc::now());
        match self
            .repo
            .append_messages(&user.id, conversation_id, &records)
            .await
        {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(HistoryError::ConversationNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete one conversation, or every conversation, for a session.
    ///
    /// Unlike loading, deleting never creates a user record: an unknown
    /// session yields `UserNotFound`. Deleting an id that does not exist (or
    /// belongs to another session) succeeds without effect.
    #[tracing::instrument(name = "delete_history", skip(self), fields(session_id = %session_id))]
    pub async fn delete_history(
        &self,
        session_id: &SessionId,
        scope: DeleteScope,
    ) -> Result<u64, HistoryError> {
        let user = self.owner(session_id).await?;

        let removed = match scope {
            DeleteScope::One(conversation_id) => {
                u64::from(self.repo.delete_conversation(&user.id, &conversation_id).await?)
            }
            DeleteScope::All => self.repo.delete_all_conversations(&user.id).await?,
        };

        info!(removed, "History deleted");
        Ok(removed)
    }

    async fn owner(&self, session_id: &SessionId) -> Result<UserRecord, HistoryError> {
        self.repo
            .find_user(session_id)
            .await?
            .ok_or(HistoryError::UserNotFound)
    }
}

fn validate_messages(messages: &[Message]) -> Result<(), HistoryError> {
    if messages.is_empty() {
        return Err(HistoryError::InvalidInput(
            "Messages array required".to_string(),
        ));
    }
    if messages.iter().any(|m| m.role == MessageRole::System) {
        return Err(HistoryError::InvalidInput(
            "Only user and assistant messages can be saved".to_string(),
        ));
    }
    Ok(())
}

fn to_records(
    conversation_id: ConversationId,
    messages: &[Message],
    now: DateTime<Utc>,
) -> Vec<ConversationMessage> {
    messages
        .iter()
        .map(|m| ConversationMessage {
            id: Uuid::now_v7(),
            conversation_id,
            role: m.role,
            content: m.content.clone(),
            created_at: now,
        })
        .collect()
}

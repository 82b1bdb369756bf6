//! SQLite history repository implementation.
//!
//! Implements `HistoryRepository` from `compass-core` with raw sqlx queries,
//! private Row structs for row-to-domain mapping, and the split reader/writer
//! pool. Multi-row writes run inside a single writer transaction.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use compass_core::history::repository::HistoryRepository;
use compass_types::error::RepositoryError;
use compass_types::history::{
    Conversation, ConversationId, ConversationMessage, MessageRole, SessionId, UserId, UserRecord,
};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryRepository`.
pub struct SqliteHistoryRepository {
    pool: DatabasePool,
}

impl SqliteHistoryRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct UserRow {
    id: String,
    session_id: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<UserRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let session_id = SessionId::parse(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;

        Ok(UserRecord {
            id: UserId(id),
            session_id,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct ConversationRow {
    id: String,
    user_id: String,
    title: String,
    created_at: String,
    updated_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_conversation(
        self,
        messages: Vec<ConversationMessage>,
    ) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;

        Ok(Conversation {
            id: ConversationId(id),
            user_id: UserId(user_id),
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
            messages,
        })
    }
}

struct MessageRow {
    id: String,
    conversation_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ConversationMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ConversationMessage {
            id,
            conversation_id: ConversationId(conversation_id),
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so lexical order equals time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(error = %e, "Database connection unavailable");
            RepositoryError::Connection
        }
        e => RepositoryError::Query(e.to_string()),
    }
}

async fn insert_messages(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    conversation_id: &ConversationId,
    messages: &[ConversationMessage],
) -> Result<(), RepositoryError> {
    for message in messages {
        sqlx::query(
            "INSERT INTO messages (id, conversation_id, role, content, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(conversation_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&mut **tx)
        .await
        .map_err(query_error)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// HistoryRepository implementation
// ---------------------------------------------------------------------------

impl HistoryRepository for SqliteHistoryRepository {
    async fn find_user(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE session_id = ?")
            .bind(session_id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let user_row = UserRow::from_row(&row).map_err(query_error)?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }

    async fn find_or_create_user(
        &self,
        session_id: &SessionId,
    ) -> Result<UserRecord, RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, session_id, created_at) VALUES (?, ?, ?)
             ON CONFLICT(session_id) DO NOTHING",
        )
        .bind(UserId::new().to_string())
        .bind(session_id.as_str())
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        // Read back through the writer so the row is visible immediately.
        let row = sqlx::query("SELECT * FROM users WHERE session_id = ?")
            .bind(session_id.as_str())
            .fetch_one(&self.pool.writer)
            .await
            .map_err(query_error)?;

        UserRow::from_row(&row).map_err(query_error)?.into_user()
    }

    async fn list_conversations(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let conversation_rows = sqlx::query(
            "SELECT * FROM conversations WHERE user_id = ? ORDER BY updated_at DESC, rowid DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let message_rows = sqlx::query(
            "SELECT m.* FROM messages m
             JOIN conversations c ON c.id = m.conversation_id
             WHERE c.user_id = ?
             ORDER BY m.created_at ASC, m.rowid ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut by_conversation: HashMap<ConversationId, Vec<ConversationMessage>> = HashMap::new();
        for row in &message_rows {
            let message = MessageRow::from_row(row).map_err(query_error)?.into_message()?;
            by_conversation
                .entry(message.conversation_id)
                .or_default()
                .push(message);
        }

        let mut conversations = Vec::with_capacity(conversation_rows.len());
        for row in &conversation_rows {
            let conversation_row = ConversationRow::from_row(row).map_err(query_error)?;
            let id = Uuid::parse_str(&conversation_row.id)
                .map(ConversationId)
                .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;
            let messages = by_conversation.remove(&id).unwrap_or_default();
            conversations.push(conversation_row.into_conversation(messages)?);
        }

        Ok(conversations)
    }

    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query(
            "INSERT INTO conversations (id, user_id, title, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(conversation.id.to_string())
        .bind(conversation.user_id.to_string())
        .bind(&conversation.title)
        .bind(format_datetime(&conversation.created_at))
        .bind(format_datetime(&conversation.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("FOREIGN KEY") {
                    return RepositoryError::Conflict(format!(
                        "user {} does not exist",
                        conversation.user_id
                    ));
                }
            }
            query_error(e)
        })?;

        insert_messages(&mut tx, &conversation.id, &conversation.messages).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn append_messages(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
        messages: &[ConversationMessage],
    ) -> Result<(), RepositoryError> {
        let updated_at = messages
            .iter()
            .map(|m| m.created_at)
            .max()
            .unwrap_or_else(Utc::now);

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let result =
            sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ? AND user_id = ?")
                .bind(format_datetime(&updated_at))
                .bind(conversation_id.to_string())
                .bind(user_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        insert_messages(&mut tx, conversation_id, messages).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn delete_conversation(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ? AND user_id = ?")
            .bind(conversation_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_conversations(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM conversations WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn session(raw: &str) -> SessionId {
        SessionId::parse(raw).unwrap()
    }

    fn make_message(
        conversation_id: ConversationId,
        role: MessageRole,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> ConversationMessage {
        ConversationMessage {
            id: Uuid::now_v7(),
            conversation_id,
            role,
            content: content.to_string(),
            created_at,
        }
    }

    fn make_conversation(user_id: UserId, title: &str, updated_at: DateTime<Utc>) -> Conversation {
        let id = ConversationId::new();
        Conversation {
            id,
            user_id,
            title: title.to_string(),
            created_at: updated_at,
            updated_at,
            messages: vec![
                make_message(id, MessageRole::User, "question", updated_at),
                make_message(id, MessageRole::Assistant, "answer", updated_at),
            ],
        }
    }

    async fn message_count(pool: &DatabasePool) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_find_or_create_user_is_idempotent() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let s1 = session("s1");

        let first = repo.find_or_create_user(&s1).await.unwrap();
        let second = repo.find_or_create_user(&s1).await.unwrap();
        assert_eq!(first, second);

        let other = repo.find_or_create_user(&session("s2")).await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_find_user_does_not_create() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        assert!(repo.find_user(&session("ghost")).await.unwrap().is_none());
        assert!(repo.find_user(&session("ghost")).await.unwrap().is_none());

        let created = repo.find_or_create_user(&session("ghost")).await.unwrap();
        assert_eq!(repo.find_user(&session("ghost")).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_at_desc() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let user = repo.find_or_create_user(&session("s1")).await.unwrap();
        let base = Utc::now();

        for (title, offset) in [("old", 0), ("newest", 20), ("middle", 10)] {
            let conversation = make_conversation(user.id, title, base + Duration::seconds(offset));
            repo.create_conversation(&conversation).await.unwrap();
        }

        let titles: Vec<String> = repo
            .list_conversations(&user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_messages_nested_in_insertion_order() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let user = repo.find_or_create_user(&session("s1")).await.unwrap();
        let conversation = make_conversation(user.id, "Test", Utc::now());
        repo.create_conversation(&conversation).await.unwrap();

        let listed = repo.list_conversations(&user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        let contents: Vec<&str> = listed[0].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["question", "answer"]);
        assert_eq!(listed[0].messages[0].role, MessageRole::User);
        assert_eq!(listed[0].id, conversation.id);
        assert_eq!(listed[0].user_id, user.id);
    }

    #[tokio::test]
    async fn test_list_scoped_to_user() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let alice = repo.find_or_create_user(&session("alice")).await.unwrap();
        let bob = repo.find_or_create_user(&session("bob")).await.unwrap();
        repo.create_conversation(&make_conversation(alice.id, "A", Utc::now()))
            .await
            .unwrap();

        assert_eq!(repo.list_conversations(&alice.id).await.unwrap().len(), 1);
        assert!(repo.list_conversations(&bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_is_atomic_when_a_message_fails() {
        let pool = test_pool().await;
        let repo = SqliteHistoryRepository::new(pool.clone());
        let user = repo.find_or_create_user(&session("s1")).await.unwrap();

        let mut conversation = make_conversation(user.id, "Broken", Utc::now());
        // Duplicate primary key on the second message.
        conversation.messages[1].id = conversation.messages[0].id;

        assert!(repo.create_conversation(&conversation).await.is_err());
        assert!(repo.list_conversations(&user.id).await.unwrap().is_empty());
        assert_eq!(message_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_create_for_missing_user_is_rejected() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let conversation = make_conversation(UserId::new(), "Orphan", Utc::now());
        assert!(matches!(
            repo.create_conversation(&conversation).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_append_messages_bumps_updated_at() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let user = repo.find_or_create_user(&session("s1")).await.unwrap();
        let base = Utc::now() - Duration::minutes(5);

        let older = make_conversation(user.id, "older", base);
        let newer = make_conversation(user.id, "newer", base + Duration::minutes(1));
        repo.create_conversation(&older).await.unwrap();
        repo.create_conversation(&newer).await.unwrap();

        let later = base + Duration::minutes(2);
        let extra = vec![make_message(older.id, MessageRole::User, "follow-up", later)];
        repo.append_messages(&user.id, &older.id, &extra).await.unwrap();

        let listed = repo.list_conversations(&user.id).await.unwrap();
        assert_eq!(listed[0].title, "older");
        assert_eq!(listed[0].messages.len(), 3);
        assert_eq!(listed[0].messages[2].content, "follow-up");
    }

    #[tokio::test]
    async fn test_append_to_missing_conversation_is_not_found() {
        let repo = SqliteHistoryRepository::new(test_pool().await);
        let user = repo.find_or_create_user(&session("s1")).await.unwrap();
        let id = ConversationId::new();
        let extra = vec![make_message(id, MessageRole::User, "hello", Utc::now())];
        assert!(matches!(
            repo.append_messages(&user.id, &id, &extra).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_append_to_another_users_conversation_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteHistoryRepository::new(pool.clone());
        let owner = repo.find_or_create_user(&session("owner")).await.unwrap();
        let intruder = repo.find_or_create_user(&session("intruder")).await.unwrap();
        let conversation = make_conversation(owner.id, "private", Utc::now());
        repo.create_conversation(&conversation).await.unwrap();

        let extra = vec![make_message(
            conversation.id,
            MessageRole::User,
            "sneaky",
            Utc::now(),
        )];
        assert!(matches!(
            repo.append_messages(&intruder.id, &conversation.id, &extra).await,
            Err(RepositoryError::NotFound)
        ));
        assert_eq!(message_count(&pool).await, 2);
        let listed = repo.list_conversations(&owner.id).await.unwrap();
        assert_eq!(listed[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_closed_pool_maps_to_connection_error() {
        let pool = test_pool().await;
        let repo = SqliteHistoryRepository::new(pool.clone());
        pool.reader.close().await;
        assert!(matches!(
            repo.find_user(&session("s1")).await,
            Err(RepositoryError::Connection)
        ));
    }

    #[tokio::test]
    async fn test_delete_conversation_is_scoped_and_cascades() {
        let pool = test_pool().await;
        let repo = SqliteHistoryRepository::new(pool.clone());
        let owner = repo.find_or_create_user(&session("owner")).await.unwrap();
        let intruder = repo.find_or_create_user(&session("intruder")).await.unwrap();

        let keep = make_conversation(owner.id, "keep", Utc::now());
        let target = make_conversation(owner.id, "target", Utc::now());
        repo.create_conversation(&keep).await.unwrap();
        repo.create_conversation(&target).await.unwrap();
        assert_eq!(message_count(&pool).await, 4);

        assert!(!repo.delete_conversation(&intruder.id, &target.id).await.unwrap());
        assert_eq!(repo.list_conversations(&owner.id).await.unwrap().len(), 2);

        assert!(repo.delete_conversation(&owner.id, &target.id).await.unwrap());
        let remaining = repo.list_conversations(&owner.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert_eq!(message_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn test_delete_all_keeps_user_record() {
        let pool = test_pool().await;
        let repo = SqliteHistoryRepository::new(pool.clone());
        let s1 = session("s1");
        let user = repo.find_or_create_user(&s1).await.unwrap();
        for title in ["a", "b"] {
            repo.create_conversation(&make_conversation(user.id, title, Utc::now()))
                .await
                .unwrap();
        }

        assert_eq!(repo.delete_all_conversations(&user.id).await.unwrap(), 2);
        assert!(repo.list_conversations(&user.id).await.unwrap().is_empty());
        assert_eq!(repo.find_user(&s1).await.unwrap(), Some(user));
        assert_eq!(message_count(&pool).await, 0);
    }

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let a = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let b = a + Duration::microseconds(1500);
        assert_eq!(format_datetime(&a), "2024-01-01T00:00:00.000000Z");
        assert_eq!(format_datetime(&b), "2024-01-01T00:00:00.001500Z");
    }
}

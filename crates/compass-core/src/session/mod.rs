//! Client-side session identity.
//!
//! A session identifier is generated once, persisted through a
//! [`SessionStore`] and reused until explicitly replaced. The store is a
//! value handed to [`SessionProvider`], so tests and alternative front ends
//! choose where the identifier lives.

use std::future::Future;

use tokio::sync::Mutex;
use tracing::{debug, info};

use compass_types::error::SessionError;
use compass_types::history::SessionId;

/// Persistence for the single session identifier string.
///
/// Implementations: `FileSessionStore` in compass-infra, [`MemorySessionStore`].
pub trait SessionStore: Send + Sync {
    /// Read the stored identifier, if any.
    fn load(&self) -> impl Future<Output = Result<Option<SessionId>, SessionError>> + Send;

    /// Replace the stored identifier.
    fn save(&self, session_id: &SessionId) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Issues and persists the client's session identifier.
pub struct SessionProvider<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return the stored identifier, generating and persisting one if absent.
    pub async fn get_or_create(&self) -> Result<SessionId, SessionError> {
        if let Some(existing) = self.store.load().await? {
            debug!(session_id = %existing, "Reusing stored session");
            return Ok(existing);
        }
        self.create_new().await
    }

    /// Unconditionally replace the stored identifier with a fresh one.
    pub async fn create_new(&self) -> Result<SessionId, SessionError> {
        let session_id = SessionId::generate();
        self.store.save(&session_id).await?;
        info!(session_id = %session_id, "Created new session");
        Ok(session_id)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<SessionId>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session_id: SessionId) -> Self {
        Self {
            value: Mutex::new(Some(session_id)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<SessionId>, SessionError> {
        Ok(self.value.lock().await.clone())
    }

    async fn save(&self, session_id: &SessionId) -> Result<(), SessionError> {
        *self.value.lock().await = Some(session_id.clone());
        Ok(())
    }
}

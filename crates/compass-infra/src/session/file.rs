//! File-backed [`SessionStore`]: the identifier lives in `<data_dir>/session_id`.

use std::path::{Path, PathBuf};

use compass_core::session::SessionStore;
use compass_types::error::SessionError;
use compass_types::history::SessionId;

const SESSION_FILE: &str = "session_id";

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionId>, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            // A blank or corrupt file is treated as no session.
            Ok(content) => Ok(SessionId::parse(&content).ok()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, session_id: &SessionId) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&self.path, session_id.as_str())
            .await
            .map_err(|e| {
                SessionError::Storage(format!("failed to write {}: {e}", self.path.display()))
            })
    }
}

use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::entity::user::Role;
use crate::error::SessionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The persisted session, one serialized document.
///
/// The field set (and the camelCase wire names) is the original eight-key
/// storage contract; writing it as a single record keeps the fields from
/// ever disagreeing with each other after a partial write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub user_name: String,
    pub user_role: Role,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historia: Option<String>,
    pub last_login: i64,
    pub session_expiry: i64,
}

/// Trait for session persistence backends.
/// This allows switching between in-memory and on-disk storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<SessionRecord>, SessionError>;
    async fn save(&self, record: &SessionRecord) -> Result<(), SessionError>;
    /// Remove any persisted session. Idempotent.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Ephemeral session storage; the default for tests and embedded use.
pub struct InMemorySessionStore {
    record: RwLock<Option<SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            record: RwLock::new(None),
        }
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.record.write().await = None;
        Ok(())
    }
}

/// Durable session storage: one JSON document on disk, the profile-local
/// equivalent of the original browser storage.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build from the `SESSION_STORE_PATH` parameter.
    pub fn from_config() -> Self {
        Self::new(parameter::get("SESSION_STORE_PATH"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(e.to_string())),
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // A record we cannot parse is no session; the next save
                // overwrites it.
                secure_log::secure_error!("Discarding unreadable session record", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::Storage(e.to_string()))?;
            }
        }
        let raw = serde_json::to_string_pretty(record)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| SessionError::Storage(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

//! Cross-session change propagation.
//!
//! Sessions sharing one [`SharedStorage`] stand in for browser tabs sharing
//! persisted storage. Every write publishes a [`StorageEvent`] tagged with
//! the writing session's id; a session ignores its own events (the writer's
//! views are updated by the stores' in-process signals, never the storage
//! notification) and re-reads wholesale on foreign ones.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::storage::{StorageBackend, StorageKey};

/// Broadcast channel capacity for storage events.
const EVENT_CAPACITY: usize = 64;

/// Identity of one open session ("tab") of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Create a new random session id.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification that a persisted snapshot changed.
#[derive(Debug, Clone)]
pub struct StorageEvent {
    /// Which snapshot changed.
    pub key: StorageKey,
    /// The session that performed the write.
    pub writer: SessionId,
}

/// A storage backend coupled with a change-notification channel.
///
/// Cloning is cheap; clones share the backend and the channel.
#[derive(Clone)]
pub struct SharedStorage {
    backend: Arc<dyn StorageBackend>,
    tx: broadcast::Sender<StorageEvent>,
}

impl SharedStorage {
    /// Wrap a backend with a fresh notification channel.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self { backend, tx }
    }

    /// Read the snapshot stored under a key.
    pub fn read(&self, key: StorageKey) -> Result<Option<String>> {
        self.backend.read(key)
    }

    /// Replace a snapshot and notify other sessions.
    pub fn write(&self, writer: SessionId, key: StorageKey, value: &str) -> Result<()> {
        self.backend.write(key, value)?;
        // No receivers is fine
        let _ = self.tx.send(StorageEvent { key, writer });
        Ok(())
    }

    /// Remove a snapshot and notify other sessions.
    pub fn remove(&self, writer: SessionId, key: StorageKey) -> Result<()> {
        self.backend.remove(key)?;
        let _ = self.tx.send(StorageEvent { key, writer });
        Ok(())
    }

    /// Subscribe to storage change events.
    ///
    /// Receivers see events from every writer, including their own session;
    /// filtering out own writes is the subscriber's responsibility.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn shared() -> SharedStorage {
        SharedStorage::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[tokio::test]
    async fn write_publishes_event_with_writer_identity() {
        let storage = shared();
        let writer = SessionId::new();
        let mut rx = storage.subscribe();

        storage.write(writer, StorageKey::Cart, "[]").unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, StorageKey::Cart);
        assert_eq!(event.writer, writer);
    }

    #[tokio::test]
    async fn remove_publishes_event() {
        let storage = shared();
        let writer = SessionId::new();
        storage.write(writer, StorageKey::Sales, "{}").unwrap();

        let mut rx = storage.subscribe();
        storage.remove(writer, StorageKey::Sales).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, StorageKey::Sales);
        assert_eq!(storage.read(StorageKey::Sales).unwrap(), None);
    }

    #[test]
    fn clones_share_the_backend() {
        let storage = shared();
        let clone = storage.clone();

        storage
            .write(SessionId::new(), StorageKey::Orders, "[]")
            .unwrap();
        assert_eq!(clone.read(StorageKey::Orders).unwrap().as_deref(), Some("[]"));
    }
}

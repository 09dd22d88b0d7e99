//! In-memory storage implementation for testing.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{StorageBackend, StorageKey};
use crate::error::Result;

/// In-memory snapshot store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.read().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        self.entries.write().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries.write().remove(&key);
        Ok(())
    }
}

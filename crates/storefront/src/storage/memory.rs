//! In-memory storage adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{PersistenceAdapter, StorageError, StorageResult};

/// In-memory storage for tests and runs without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        storage.write("k", "[1,2]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_overwrite_last_writer_wins() {
        let storage = MemoryStorage::new();
        storage.write("k", "a").unwrap();
        storage.write("k", "b").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove("missing").unwrap();
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.read("k").unwrap().is_none());
        assert!(storage.keys().unwrap().is_empty());
    }
}

//! The "mutate then persist" stage shared by every store.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{PersistenceAdapter, StorageError, StorageResult};

/// A value mirrored to a single storage key.
///
/// Mutations go through [`Persisted::mutate`], which applies the change in
/// memory first and then writes the whole snapshot. A value that serializes
/// to `null` (e.g. `Option::None`) removes the key instead.
#[derive(Debug)]
pub struct Persisted<T> {
    key: &'static str,
    storage: Arc<dyn PersistenceAdapter>,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Restores the value stored under `key`.
    ///
    /// A missing key yields `T::default()` and is left unwritten until the
    /// first mutation. A snapshot that no longer decodes is logged and
    /// replaced by `T::default()` on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter itself fails.
    pub fn load(key: &'static str, storage: Arc<dyn PersistenceAdapter>) -> StorageResult<Self> {
        let value = Self::read_snapshot(key, storage.as_ref())?.unwrap_or_default();
        Ok(Self {
            key,
            storage,
            value,
        })
    }

    /// Restores the value stored under `key`, or seeds it with `init` when
    /// the key is entirely absent.
    ///
    /// The seeded value is written immediately; an existing key is never
    /// overwritten by `init`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails to read or to write the
    /// seeded value.
    pub fn load_or_else(
        key: &'static str,
        storage: Arc<dyn PersistenceAdapter>,
        init: impl FnOnce() -> T,
    ) -> StorageResult<Self> {
        let Some(value) = Self::read_snapshot(key, storage.as_ref())? else {
            let seeded = Self {
                key,
                storage,
                value: init(),
            };
            seeded.flush()?;
            return Ok(seeded);
        };

        Ok(Self {
            key,
            storage,
            value,
        })
    }

    /// Decodes the snapshot under `key`. `None` when the key is absent.
    fn read_snapshot(key: &str, storage: &dyn PersistenceAdapter) -> StorageResult<Option<T>> {
        let Some(raw) = storage.read(key)? else {
            return Ok(None);
        };

        let value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "Discarding unreadable snapshot");
                T::default()
            }
        };
        Ok(Some(value))
    }

    /// The current in-memory value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// The storage key this value is mirrored to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Applies `f` to the value, then persists the full snapshot.
    ///
    /// The in-memory change is kept even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> StorageResult<R> {
        let result = f(&mut self.value);
        self.flush()?;
        Ok(result)
    }

    /// Replaces the value, then persists it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn replace(&mut self, value: T) -> StorageResult<T> {
        self.mutate(|current| std::mem::replace(current, value))
    }

    /// Writes the current value to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    pub fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.value)
            .map_err(|e| StorageError::serialization(self.key, e))?;
        if json == "null" {
            self.storage.remove(self.key)
        } else {
            self.storage.write(self.key, &json)
        }
    }
}

//! Durable key-value storage for store snapshots.
//!
//! Every store persists its whole collection under a single well-known key
//! (see [`keys`]). Adapters only guarantee per-key atomic overwrite; there are
//! no transactions and the last writer wins.
//!
//! # Adapters
//!
//! - [`MemoryStorage`] - process-local map, used by tests and ephemeral runs
//! - [`FileStorage`] - one JSON file per key inside a data directory
//!
//! The [`Persisted`] wrapper is the "mutate then persist" stage the stores
//! build on.

mod file;
mod memory;
mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::Persisted;

use thiserror::Error;

/// Errors that can occur while reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot serialization error on {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lock guarding the adapter was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    /// Creates an I/O error for a key.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates a serialization error for a key.
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value storage for serialized snapshots.
///
/// All operations are synchronous from the caller's point of view.
pub trait PersistenceAdapter: Send + Sync + std::fmt::Debug {
    /// Reads the serialized value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Storage keys used by the stores.
pub mod keys {
    /// Key for the signed-in user projection.
    pub const SESSION_USER: &str = "cendev-user";

    /// Key for the mock user directory (includes credentials).
    pub const USER_DIRECTORY: &str = "cendev-users";

    /// Key for the cart snapshot.
    pub const CART: &str = "cendev-cart";

    /// Key for the wishlist snapshot.
    pub const WISHLIST: &str = "cendev-wishlist";
}

//! Durable local key-value state.
//!
//! The cart store and the local catalog only ever talk to storage through
//! [`KeyValueStore`]: read a serialized string by key, overwrite it, or drop
//! it. Two implementations ship:
//!
//! - [`FileStore`] - one JSON file per key under a data directory
//! - [`MemoryStore`] - process memory, shared between clones (tests, demos)

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem read or write failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Another thread panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage.
///
/// Methods take `&self` so a backend can be shared between several stores;
/// implementations use interior mutability where they need it.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

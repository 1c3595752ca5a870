//! Key-value persistence port.
//!
//! Each store persists one record (or record set) under a well-known key.
//! The engine only ever talks to [`KeyValueStore`], so the on-disk backend
//! ([`JsonFileStore`]) can be swapped for the in-memory fake
//! ([`MemoryStore`]) in tests. The handle is injected explicitly; no store
//! reaches for ambient global state.
//!
//! ## Record keys
//!
//! - [`keys::CATALOG`] - JSON array of products, display prices verbatim
//! - [`keys::CART`] - JSON array of `{"id": n, "qty": n}` pairs
//! - [`keys::USERS`] - JSON array of user objects
//! - [`keys::SALES`] - JSON array of sale objects, append-only

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known record keys, one per store.
pub mod keys {
    /// Product catalog record.
    pub const CATALOG: &str = "catalog";
    /// Cart line record.
    pub const CART: &str = "cart";
    /// Registered users record.
    pub const USERS: &str = "users";
    /// Sales log record.
    pub const SALES: &str = "sales";
}

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not read or write a record.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record exists but does not deserialize.
    #[error("corrupt record '{key}': {source}")]
    Corrupt {
        /// Record key.
        key: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for persistence.
    #[error("failed to encode record '{key}': {source}")]
    Encode {
        /// Record key.
        key: String,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous key-value persistence port.
///
/// Implementations must make `put` all-or-nothing: after a failed write the
/// previously persisted value must still be intact.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, or `None` if never written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write fails; the previous value
    /// is preserved.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value for `key`. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend, cloned into each store.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Read and decode a JSON record.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] if the record exists but does not
/// decode, or an I/O error from the backend.
pub fn read_record<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and persist a JSON record.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if the value does not serialize, or an
/// I/O error from the backend.
pub fn write_record<T: Serialize>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.put(key, &raw)
}

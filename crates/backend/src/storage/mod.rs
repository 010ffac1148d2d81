//! Pluggable key-value storage backends.
//!
//! The record store never touches a concrete storage mechanism; it talks
//! to [`StorageBackend`], which maps a collection name to one serialized
//! payload. [`MemoryBackend`] backs tests, [`FileBackend`] persists one
//! JSON file per collection under a data directory.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named-collection key-value store.
///
/// Implementations hold whole collections as opaque strings; the record
/// store layers serialization, seeding, and uniqueness on top.
pub trait StorageBackend: Send + Sync {
    /// Read the payload for a collection; `None` if never written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the payload cannot be read.
    fn read(&self, collection: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload for a collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the payload cannot be persisted.
    fn write(&self, collection: &str, payload: &str) -> Result<(), StorageError>;
}

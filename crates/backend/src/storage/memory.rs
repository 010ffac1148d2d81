//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{StorageBackend, StorageError};

/// Storage backend holding collections in a process-local map.
///
/// Loses everything on drop; intended for tests and throwaway demos.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, collection: &str) -> Result<Option<String>, StorageError> {
        let collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(collections.get(collection).cloned())
    }

    fn write(&self, collection: &str, payload: &str) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        collections.insert(collection.to_owned(), payload.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_back_what_was_written() {
        let backend = MemoryBackend::new();
        assert!(backend.read("orders").expect("read").is_none());

        backend.write("orders", "[]").expect("write");
        assert_eq!(backend.read("orders").expect("read").as_deref(), Some("[]"));

        backend.write("orders", "[1]").expect("write");
        assert_eq!(
            backend.read("orders").expect("read").as_deref(),
            Some("[1]")
        );
    }
}

//! Generic record store.
//!
//! A [`RecordStore`] owns one named collection in the storage backend,
//! serialized as an ordered JSON array. First read of an empty collection
//! seeds it from a fixed baseline dataset. All operations are synchronous
//! whole-collection read-modify-write; there is no row-level persistence.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use gasdepot_core::PhoneError;

use crate::storage::{StorageBackend, StorageError};

/// Errors raised by repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A record with the same unique key already exists.
    #[error("a record with key {0} already exists")]
    DuplicateKey(String),
    /// A phone number failed validation on create/update.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A persisted collection does not deserialize.
    #[error("corrupt data in collection {collection}: {message}")]
    DataCorruption {
        /// Collection that failed to round-trip.
        collection: String,
        /// Underlying serde error.
        message: String,
    },
}

/// A persistable record with a unique key within its collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Name of the persisted collection this record lives in.
    const COLLECTION: &'static str;

    /// The record's unique key (`rut` for profiles, `id` otherwise).
    fn key(&self) -> &str;
}

/// Typed store over one collection.
pub struct RecordStore<R> {
    backend: Arc<dyn StorageBackend>,
    seed: Vec<R>,
}

impl<R> Clone for RecordStore<R>
where
    R: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            seed: self.seed.clone(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Create a store over `backend` with the given baseline dataset.
    pub fn new(backend: Arc<dyn StorageBackend>, seed: Vec<R>) -> Self {
        Self { backend, seed }
    }

    /// All records in insertion order.
    ///
    /// An absent or empty collection is first populated from the seed
    /// dataset (unless the seed itself is empty).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_all(&self) -> Result<Vec<R>, RepositoryError> {
        let records = match self.backend.read(R::COLLECTION)? {
            Some(raw) => Self::decode(&raw)?,
            None => Vec::new(),
        };

        if records.is_empty() && !self.seed.is_empty() {
            debug!(collection = R::COLLECTION, count = self.seed.len(), "seeding empty collection");
            self.persist(&self.seed)?;
            return Ok(self.seed.clone());
        }

        Ok(records)
    }

    /// The record with the given key, if present.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get(&self, key: &str) -> Result<Option<R>, RepositoryError> {
        Ok(self.get_all()?.into_iter().find(|r| r.key() == key))
    }

    /// Append a record, enforcing key uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateKey`] if the key is taken; the
    /// collection is left untouched in that case.
    pub fn create(&self, record: R) -> Result<(), RepositoryError> {
        let mut records = self.get_all()?;
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(RepositoryError::DuplicateKey(record.key().to_owned()));
        }

        debug!(collection = R::COLLECTION, key = record.key(), "creating record");
        records.push(record);
        self.persist(&records)
    }

    /// Merge changes into the record with the given key.
    ///
    /// `apply` mutates only the fields it means to change; everything else
    /// is untouched. Returns the updated record, or `None` (writing
    /// nothing) when the key is missing.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn update(
        &self,
        key: &str,
        apply: impl FnOnce(&mut R),
    ) -> Result<Option<R>, RepositoryError> {
        let mut records = self.get_all()?;
        let Some(record) = records.iter_mut().find(|r| r.key() == key) else {
            return Ok(None);
        };

        apply(record);
        let updated = record.clone();
        debug!(collection = R::COLLECTION, key, "updating record");
        self.persist(&records)?;
        Ok(Some(updated))
    }

    /// Remove the record with the given key. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let mut records = self.get_all()?;
        records.retain(|r| r.key() != key);
        debug!(collection = R::COLLECTION, key, "deleting record");
        self.persist(&records)
    }

    fn persist(&self, records: &[R]) -> Result<(), RepositoryError> {
        let payload = serde_json::to_string(records).map_err(|e| Self::corrupt(&e))?;
        self.backend.write(R::COLLECTION, &payload)?;
        Ok(())
    }

    fn decode(raw: &str) -> Result<Vec<R>, RepositoryError> {
        serde_json::from_str(raw).map_err(|e| Self::corrupt(&e))
    }

    fn corrupt(e: &serde_json::Error) -> RepositoryError {
        RepositoryError::DataCorruption {
            collection: R::COLLECTION.to_owned(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::storage::MemoryBackend;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        label: String,
    }

    impl Record for Widget {
        const COLLECTION: &'static str = "test_widgets";

        fn key(&self) -> &str {
            &self.id
        }
    }

    fn widget(id: &str, label: &str) -> Widget {
        Widget {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }

    fn store_with_seed(seed: Vec<Widget>) -> RecordStore<Widget> {
        RecordStore::new(Arc::new(MemoryBackend::new()), seed)
    }

    #[test]
    fn empty_collection_is_seeded() {
        let store = store_with_seed(vec![widget("a", "first")]);
        assert_eq!(store.get_all().expect("seeded read").len(), 1);

        // a collection emptied out entirely re-seeds on the next read;
        // "empty" and "never written" are treated alike
        store.delete("a").expect("delete");
        assert_eq!(store.get_all().expect("read"), vec![widget("a", "first")]);
    }

    #[test]
    fn seed_does_not_fire_on_nonempty_collection() {
        let store = store_with_seed(vec![widget("a", "first")]);
        store.get_all().expect("seed");
        store.create(widget("b", "second")).expect("create");

        let keys: Vec<_> = store
            .get_all()
            .expect("read")
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_seed_means_empty_collection() {
        let store = store_with_seed(Vec::new());
        assert!(store.get_all().expect("read").is_empty());
    }

    #[test]
    fn create_is_not_idempotent() {
        let store = store_with_seed(Vec::new());
        store.create(widget("a", "first")).expect("create");

        let err = store.create(widget("a", "again")).expect_err("duplicate");
        assert!(matches!(err, RepositoryError::DuplicateKey(ref k) if k == "a"));
        // the failed call left the collection unchanged
        let all = store.get_all().expect("read");
        assert_eq!(all, vec![widget("a", "first")]);
    }

    #[test]
    fn update_merges_and_ignores_missing_keys() {
        let store = store_with_seed(Vec::new());
        store.create(widget("a", "first")).expect("create");

        let updated = store
            .update("a", |w| w.label = "renamed".to_owned())
            .expect("update");
        assert_eq!(updated, Some(widget("a", "renamed")));

        let untouched = store
            .update("missing", |w| w.label = "ghost".to_owned())
            .expect("update");
        assert_eq!(untouched, None);
        assert_eq!(store.get_all().expect("read"), vec![widget("a", "renamed")]);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = store_with_seed(Vec::new());
        store.create(widget("a", "first")).expect("create");

        store.delete("a").expect("first delete");
        store.delete("a").expect("second delete");
        assert!(store.get_all().expect("read").is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = store_with_seed(Vec::new());
        for id in ["c", "a", "b"] {
            store.create(widget(id, id)).expect("create");
        }
        let keys: Vec<_> = store
            .get_all()
            .expect("read")
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn corrupt_payload_surfaces_data_corruption() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write("test_widgets", "not json").expect("write");
        let store = RecordStore::<Widget>::new(backend, Vec::new());

        let err = store.get_all().expect_err("corrupt");
        assert!(matches!(err, RepositoryError::DataCorruption { .. }));
    }
}

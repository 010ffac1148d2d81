//! File-per-collection storage backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StorageBackend, StorageError};

/// Storage backend writing each collection to `<data_dir>/<name>.json`.
///
/// Writes go through a sibling temp file and a rename so a crash mid-write
/// leaves the previous payload intact.
#[derive(Debug)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)?;
        debug!(dir = %data_dir.display(), "opened file storage");
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, collection: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.collection_path(collection)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, collection: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.collection_path(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

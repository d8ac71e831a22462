//! File-backed key-value store.
//!
//! All entries live in one JSON object file, by default in the platform
//! config directory:
//! - Linux: ~/.config/applymail/storage.json
//! - macOS: ~/Library/Application Support/applymail/storage.json
//! - Windows: %APPDATA%/applymail/storage.json

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use applymail_application::ports::{KeyValueStore, StorageError};
use tracing::{debug, warn};

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a JSON object file.
///
/// ```json
/// {
///   "variableFavorites": "[\"companyName\",\"position\"]"
/// }
/// ```
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the Applymail config directory.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("applymail"))
    }

    /// Returns the default storage file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("storage.json"))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let bytes = std::fs::read(&self.path)?;
        from_json_bytes(&bytes).map_err(to_storage_error)
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = to_json_stable_bytes(entries).map_err(to_storage_error)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "storage written");
        Ok(())
    }
}

fn to_storage_error(e: SerializationError) -> StorageError {
    match e {
        SerializationError::Io(io) => StorageError::Io(io),
        other => StorageError::Serialization(other.to_string()),
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Serialization(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupt, replacing it"
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

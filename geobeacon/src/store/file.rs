//! File-backed state store.
//!
//! One file per key under a store directory, written whole on every `set`.
//! There is no locking across processes: the store is intended for a single
//! reporting process, where concurrent writers at most race on the same key
//! and the last completed write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{validate_key, StateStore, StoreError};

/// Durable key/value store with one file per key.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DirectoryError`] if the directory cannot be
    /// created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StoreError::DirectoryError)?;
        Ok(Self { dir })
    }

    /// Get the directory backing this store.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadError {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::write(self.key_path(key), value).map_err(|e| StoreError::WriteError {
            key: key.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStateStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_key_reads_none() {
        let (_dir, store) = store();
        assert_eq!(store.get(keys::LAST_HOST).unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, store) = store();
        store.set(keys::LAST_HOST, "tracker.example.org").unwrap();
        assert_eq!(
            store.get(keys::LAST_HOST).unwrap().as_deref(),
            Some("tracker.example.org")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = store();
        store.set(keys::LAST_PORT, "12345").unwrap();
        store.set(keys::LAST_PORT, "54321").unwrap();
        assert_eq!(store.get(keys::LAST_PORT).unwrap().as_deref(), Some("54321"));
    }

    #[test]
    fn test_values_survive_a_fresh_handle() {
        let (dir, store) = store();
        store.set(keys::LAST_LATITUDE, "53.5511").unwrap();
        drop(store);

        let reopened = FileStateStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get(keys::LAST_LATITUDE).unwrap().as_deref(),
            Some("53.5511")
        );
    }

    #[test]
    fn test_invalid_key_is_rejected_before_io() {
        let (_dir, store) = store();
        assert!(matches!(
            store.get("../sneaky"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            store.set("../sneaky", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("state").join("geobeacon");
        let store = FileStateStore::new(&nested).unwrap();
        store.set(keys::DEVICE_ID, "ABC").unwrap();
        assert!(nested.join(keys::DEVICE_ID).exists());
    }
}

//! In-memory state store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{validate_key, StateStore, StoreError};

/// Volatile store for tests and ephemeral sessions. Values do not survive
/// the process.
#[derive(Default)]
pub struct MemoryStateStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys;

    #[test]
    fn test_empty_store_reads_none() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get(keys::DEVICE_ID).unwrap(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStateStore::new();
        store.set(keys::LAST_DELIVERY_MESSAGE, "first").unwrap();
        store.set(keys::LAST_DELIVERY_MESSAGE, "second").unwrap();
        assert_eq!(
            store.get(keys::LAST_DELIVERY_MESSAGE).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let store = MemoryStateStore::new();
        assert!(matches!(store.get("Bad"), Err(StoreError::InvalidKey(_))));
    }
}

//! Device identity.
//!
//! Every delivery record carries a stable device identifier. The identifier
//! is generated once per store and persisted, so it survives restarts and
//! stays constant across sessions.

use tracing::info;
use uuid::Uuid;

use crate::store::{keys, StateStore, StoreError};

/// Load the persisted device identifier, generating and persisting a new one
/// on first use.
///
/// # Errors
///
/// Returns a [`StoreError`] if the store cannot be read or the new identifier
/// cannot be persisted.
pub fn load_or_create(store: &dyn StateStore) -> Result<String, StoreError> {
    if let Some(id) = store.get(keys::DEVICE_ID)? {
        return Ok(id);
    }

    let id = Uuid::new_v4().simple().to_string();
    store.set(keys::DEVICE_ID, &id)?;
    info!(device_id = %id, "Generated new device identifier");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStateStore;

    #[test]
    fn test_generates_identifier_on_first_use() {
        let store = MemoryStateStore::new();
        let id = load_or_create(&store).unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.get(keys::DEVICE_ID).unwrap().as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_identifier_is_stable() {
        let store = MemoryStateStore::new();
        let first = load_or_create(&store).unwrap();
        let second = load_or_create(&store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_respects_preexisting_identifier() {
        let store = MemoryStateStore::new();
        store.set(keys::DEVICE_ID, "fixed_id_01").unwrap();
        assert_eq!(load_or_create(&store).unwrap(), "fixed_id_01");
    }
}

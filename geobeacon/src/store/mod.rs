//! State Store - durable last-known-value storage.
//!
//! A minimal get/set string store used for the connection target, the last
//! position, and the last delivery outcome. Writes are immediately durable;
//! there is no batching and no transaction across keys - a crash between two
//! related writes may leave a stale pairing, which is accepted and documented
//! rather than papered over.
//!
//! - [`StateStore`] - the get/set contract
//! - [`FileStateStore`] - file-per-key store surviving process restarts
//! - [`MemoryStateStore`] - in-process store for tests and ephemeral use
//! - [`keys`] - the persisted key constants

mod file;
pub mod keys;
mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Keys are restricted to `[a-z0-9_]` so they map safely onto file names.
    #[error("Invalid state key '{0}': keys must be non-empty lowercase [a-z0-9_]")]
    InvalidKey(String),

    /// Failed to create the store directory.
    #[error("Failed to create state directory: {0}")]
    DirectoryError(#[source] std::io::Error),

    /// Failed to read a value.
    #[error("Failed to read state key '{key}': {source}")]
    ReadError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a value.
    #[error("Failed to write state key '{key}': {source}")]
    WriteError {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable last-known-value store.
///
/// Implementations must be safe for concurrent access from multiple delivery
/// tasks; each `set` overwrites the previous value so the last completed
/// write wins.
pub trait StateStore: Send + Sync {
    /// Get the most recent value written for `key`, or `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Durably write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Validate a store key: non-empty, lowercase alphanumeric plus underscore.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

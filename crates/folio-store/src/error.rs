//! Storage error types for folio-store.

use thiserror::Error;

/// Errors from a key/value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would push total stored bytes past the quota.
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { key: String, needed: u64, quota: u64 },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// A value could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A write that had to reach the local store did not.
///
/// The data for that single operation is lost; in-memory state is left as
/// it was before the operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("local storage failed to persist '{key}'")]
pub struct LocalStorageError {
    pub key: String,
}

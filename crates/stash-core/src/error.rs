//! Error types for Stash core operations.
//!
//! Every failure kind here is absorbed at the store boundary (empty
//! collection, no-op, ephemeral key). The lower-level modules still return
//! them so callers and tests can tell the cases apart.

use thiserror::Error;

/// Result type alias for Stash operations.
pub type Result<T> = std::result::Result<T, StashError>;

/// Core error type for Stash operations.
#[derive(Debug, Error)]
pub enum StashError {
    /// Secret store could not be read or written
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    /// Ciphertext failed authentication (wrong key, corruption, tampering)
    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    /// Plaintext authenticated but is not a valid record collection
    #[error("Decode error: {0}")]
    Decode(String),

    /// Writing the backing file failed
    #[error("Persist failed: {0}")]
    Persist(String),

    /// Record rejected by validation (blank content or alias)
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for StashError {
    fn from(err: serde_json::Error) -> Self {
        StashError::Decode(err.to_string())
    }
}

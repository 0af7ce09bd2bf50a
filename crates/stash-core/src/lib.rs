//! # Stash Core
//!
//! Core library for Stash - a local, single-user store of small typed items
//! (text, passwords, images, links) kept in one encrypted file.
//!
//! This crate provides the data model, the key-management contract and the
//! encrypted store, independent of any presentation layer.
//!
//! ## Architecture
//!
//! - **keys**: key providers (platform keychain, device keyfile)
//! - **record**: tagged record variants and validation
//! - **codec**: versioned serialization of the record collection
//! - **crypto**: symmetric key type and ChaCha20-Poly1305 sealing
//! - **store**: the authoritative encrypted collection on disk
//! - **query**: search and partitioning over a collection snapshot

pub mod codec;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod keys;
pub mod query;
pub mod record;
pub mod store;

pub use crypto::SymmetricKey;
pub use error::{Result, StashError};
pub use keys::{resolve_key, KeyProvider};
pub use query::{filter, partition_by_variant, Partitioned};
pub use record::{Record, RecordKind, RecordVariant};
pub use store::{EncryptedStore, LoadStatus, RetentionPolicy};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

//! Key providers.
//!
//! A [`KeyProvider`] obtains the device key from some secret store, creating
//! and storing a new one on first use. The store never persists the key
//! itself; it receives an owned [`SymmetricKey`] once, at open time.

mod keychain;
mod keyfile;

pub use keychain::{KeychainProvider, DEFAULT_KEY_ACCOUNT, DEFAULT_SERVICE};
pub use keyfile::KeyfileProvider;

use tracing::warn;

use crate::crypto::SymmetricKey;
use crate::error::Result;

/// Source of the device encryption key.
pub trait KeyProvider {
    /// Return the stored key, generating and storing one if none exists.
    ///
    /// # Errors
    ///
    /// Returns `StashError::KeyUnavailable` if the secret store cannot be
    /// read or written, or holds malformed key material.
    fn get_or_create_key(&self) -> Result<SymmetricKey>;

    /// Short human-readable description of where the key lives.
    fn describe(&self) -> String;
}

/// Get the key from `provider`, falling back to an ephemeral key.
///
/// The ephemeral key cannot decrypt anything written with the stored key, so
/// an existing store file will open as empty and be quarantined.
///
/// # Errors
///
/// Provider failures are absorbed. The only error returned is the OS having
/// no random number generator to mint the ephemeral key with.
pub fn resolve_key(provider: &dyn KeyProvider) -> Result<SymmetricKey> {
    match provider.get_or_create_key() {
        Ok(key) => Ok(key),
        Err(err) => {
            warn!(
                provider = %provider.describe(),
                error = %err,
                "key provider failed; using an ephemeral key for this process"
            );
            SymmetricKey::generate()
        }
    }
}

/// A provider that always hands out the same key.
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    key: SymmetricKey,
}

impl StaticKeyProvider {
    pub fn new(key: SymmetricKey) -> Self {
        Self { key }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn get_or_create_key(&self) -> Result<SymmetricKey> {
        Ok(self.key.clone())
    }

    fn describe(&self) -> String {
        "static key".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StashError;

    struct BrokenProvider;

    impl KeyProvider for BrokenProvider {
        fn get_or_create_key(&self) -> Result<SymmetricKey> {
            Err(StashError::KeyUnavailable("secret store locked".to_string()))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_resolve_key_uses_provider_key() {
        let provider = StaticKeyProvider::new(SymmetricKey::from_bytes([9; 32]));
        assert_eq!(resolve_key(&provider).unwrap().as_bytes(), &[9; 32]);
    }

    #[test]
    fn test_resolve_key_falls_back_to_ephemeral() {
        let first = resolve_key(&BrokenProvider).unwrap();
        let second = resolve_key(&BrokenProvider).unwrap();

        // Each fallback is a brand new key.
        assert_ne!(first.as_bytes(), second.as_bytes());
    }
}

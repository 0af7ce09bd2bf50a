//! Platform keychain provider (macOS Keychain, Secret Service, Windows
//! Credential Manager) via the `keyring` crate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::KeyProvider;
use crate::crypto::SymmetricKey;
use crate::error::{Result, StashError};

/// Keychain service name used by default.
pub const DEFAULT_SERVICE: &str = "stash";

/// Keychain account under which the device key is stored.
pub const DEFAULT_KEY_ACCOUNT: &str = "stash.encryption-key";

/// Stores the device key as one generic credential entry.
///
/// `keyring` only stores strings, so the 32 raw bytes are kept base64-encoded.
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service: String,
    account: String,
}

impl KeychainProvider {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| StashError::KeyUnavailable(format!("Keychain entry failed: {}", e)))
    }

    fn read(&self, entry: &keyring::Entry) -> Result<Option<SymmetricKey>> {
        match entry.get_password() {
            Ok(value) => {
                let bytes = Zeroizing::new(STANDARD.decode(value.trim()).map_err(|e| {
                    StashError::KeyUnavailable(format!("Stored key is not valid base64: {}", e))
                })?);
                SymmetricKey::from_slice(&bytes).map(Some)
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(StashError::KeyUnavailable(format!(
                "Keychain read failed: {}",
                err
            ))),
        }
    }

    fn write(&self, entry: &keyring::Entry, key: &SymmetricKey) -> Result<()> {
        // Clear any stale entry first; some backends reject duplicate inserts.
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(err) => {
                return Err(StashError::KeyUnavailable(format!(
                    "Keychain delete failed: {}",
                    err
                )))
            }
        }
        let encoded = Zeroizing::new(STANDARD.encode(key.as_bytes()));
        entry
            .set_password(&encoded)
            .map_err(|e| StashError::KeyUnavailable(format!("Keychain write failed: {}", e)))
    }
}

impl Default for KeychainProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE, DEFAULT_KEY_ACCOUNT)
    }
}

impl KeychainProvider {
    /// Get-or-create against one entry. Malformed stored material is an error
    /// and is left in place.
    fn get_or_create_in(&self, entry: &keyring::Entry) -> Result<SymmetricKey> {
        if let Some(key) = self.read(entry)? {
            debug!(service = %self.service, "loaded device key from keychain");
            return Ok(key);
        }

        let key = SymmetricKey::generate()?;
        self.write(entry, &key)?;
        info!(service = %self.service, "created new device key in keychain");
        Ok(key)
    }
}

impl KeyProvider for KeychainProvider {
    fn get_or_create_key(&self) -> Result<SymmetricKey> {
        let entry = self.entry()?;
        self.get_or_create_in(&entry)
    }

    fn describe(&self) -> String {
        format!("keychain ({}/{})", self.service, self.account)
    }
}

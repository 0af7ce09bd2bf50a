//! Device keyfile provider: the raw 32-byte key in an owner-only file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;
use zeroize::Zeroizing;

use super::KeyProvider;
use crate::crypto::SymmetricKey;
use crate::error::{Result, StashError};
use crate::fs::{ensure_parent_dir, set_owner_only, write_replace};

/// Keeps the device key in a plain file, for machines without a keychain.
#[derive(Debug, Clone)]
pub struct KeyfileProvider {
    path: PathBuf,
}

impl KeyfileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, action: &str, err: std::io::Error) -> StashError {
        StashError::KeyUnavailable(format!(
            "Failed to {} keyfile {}: {}",
            action,
            self.path.display(),
            err
        ))
    }
}

impl KeyProvider for KeyfileProvider {
    fn get_or_create_key(&self) -> Result<SymmetricKey> {
        match fs::read(&self.path) {
            Ok(bytes) => return SymmetricKey::from_slice(&Zeroizing::new(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(self.unavailable("read", err)),
        }

        let key = SymmetricKey::generate()?;
        ensure_parent_dir(&self.path).map_err(|e| self.unavailable("create directory for", e))?;
        write_replace(&self.path, key.as_bytes()).map_err(|e| self.unavailable("write", e))?;
        set_owner_only(&self.path).map_err(|e| self.unavailable("restrict", e))?;
        info!(path = %self.path.display(), "created new device keyfile");
        Ok(key)
    }

    fn describe(&self) -> String {
        format!("keyfile ({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_LENGTH;
    use tempfile::tempdir;

    #[test]
    fn test_creates_then_reuses_key() {
        let dir = tempdir().unwrap();
        let provider = KeyfileProvider::new(dir.path().join("keys").join("stash.key"));

        let first = provider.get_or_create_key().unwrap();
        let second = provider.get_or_create_key().unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(fs::read(provider.path()).unwrap().len(), KEY_LENGTH);
    }

    #[test]
    fn test_malformed_keyfile_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stash.key");
        fs::write(&path, b"too short").unwrap();

        let result = KeyfileProvider::new(&path).get_or_create_key();
        assert!(matches!(result, Err(StashError::KeyUnavailable(_))));
        // A malformed file is never silently replaced.
        assert_eq!(fs::read(&path).unwrap(), b"too short");
    }

    #[cfg(unix)]
    #[test]
    fn test_keyfile_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let provider = KeyfileProvider::new(dir.path().join("stash.key"));
        provider.get_or_create_key().unwrap();

        let mode = fs::metadata(provider.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

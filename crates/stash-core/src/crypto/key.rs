//! The device encryption key.

use zeroize::ZeroizeOnDrop;

use crate::error::{Result, StashError};

/// Length of the key in bytes (32 bytes = 256 bits).
pub const KEY_LENGTH: usize = 32;

/// A 256-bit symmetric key.
///
/// Key material is zeroized from memory when the value is dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_LENGTH],
}

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Build a key from a slice, which must be exactly [`KEY_LENGTH`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| {
            StashError::KeyUnavailable(format!(
                "Key material must be {} bytes (got {})",
                KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self::from_bytes(key))
    }

    /// Generate a fresh key from the OS random number generator.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_LENGTH];
        getrandom::getrandom(&mut bytes).map_err(|e| {
            StashError::KeyUnavailable(format!("Failed to generate key bytes: {}", e))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        let key1 = SymmetricKey::generate().unwrap();
        let key2 = SymmetricKey::generate().unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_from_slice_requires_exact_length() {
        assert!(SymmetricKey::from_slice(&[7u8; KEY_LENGTH]).is_ok());

        let result = SymmetricKey::from_slice(&[7u8; 16]);
        assert!(matches!(result, Err(StashError::KeyUnavailable(_))));
        assert!(result.unwrap_err().to_string().contains("got 16"));
    }

    #[test]
    fn test_debug_redacts() {
        let key = SymmetricKey::from_bytes([0xAB; KEY_LENGTH]);
        let debug_output = format!("{:?}", key);

        assert!(debug_output.contains("REDACTED"));
        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}

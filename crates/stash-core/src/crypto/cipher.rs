//! ChaCha20-Poly1305 sealing of the store payload.
//!
//! The output is a single self-contained byte sequence:
//!
//! ```text
//! [NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! Decryption needs only the key and these bytes.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

use super::key::SymmetricKey;
use crate::error::{Result, StashError};

/// Nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
///
/// # Examples
///
/// ```
/// use stash_core::crypto::{decrypt, encrypt, SymmetricKey};
///
/// let key = SymmetricKey::generate().unwrap();
/// let sealed = encrypt(b"secret data", &key).unwrap();
/// assert_eq!(decrypt(&sealed, &key).unwrap(), b"secret data");
/// ```
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| StashError::Persist(format!("Failed to generate nonce: {}", e)))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| StashError::Persist("Encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a combined `nonce ‖ ciphertext ‖ tag` sequence.
///
/// # Errors
///
/// Returns `StashError::DecryptionFailure` if:
/// - The input is shorter than a nonce plus a tag
/// - The key is wrong
/// - Any byte was altered
pub fn decrypt(sealed: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(StashError::DecryptionFailure(format!(
            "Sealed payload too short ({} bytes)",
            sealed.len()
        )));
    }

    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            StashError::DecryptionFailure("Authentication tag mismatch".to_string())
        })
}

//! Cryptographic operations for Stash.
//!
//! - **ChaCha20-Poly1305**: authenticated encryption of the whole store file
//! - **getrandom**: key material and per-call nonces from the OS RNG
//!
//! ## Security Model
//!
//! - One 256-bit device key, held by the platform secret store
//! - A fresh random nonce for every encryption, stored in front of the ciphertext
//! - Key material zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft or tampering of the store file on its own
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to the unlocked user session (which can read the keychain)

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use key::{SymmetricKey, KEY_LENGTH};

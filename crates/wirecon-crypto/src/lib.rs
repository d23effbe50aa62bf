//! Wirecon Protocol Crypto Library
//!
//! Provides the symmetric cipher layer for the Wirecon remote-command
//! protocol: per-exchange key derivation and the encrypted blob codec
//! used in request/response envelopes.
//!
//! ## Crypto primitives
//!
//! - **Key derivation**: SHA-256 over `secret || "_" || nonce || "_" || timestamp`
//! - **Encryption**: AES-256-CBC, random 16-byte IV, PKCS#7 padding
//! - **Blob framing**: base64(IV || ciphertext) for transport inside JSON

pub mod cipher;
pub mod error;
pub mod key;

#[cfg(any(test, feature = "test-utils"))]
pub use cipher::encrypt_with_iv;
pub use cipher::{BLOCK_SIZE, decrypt, encrypt};
pub use error::CryptoError;
pub use key::{DerivedKey, KEY_SIZE, NONCE_LEN, derive_key, generate_nonce};

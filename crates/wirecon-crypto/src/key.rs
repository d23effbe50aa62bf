//! Per-exchange key derivation.
//!
//! Every request and every response gets its own AES-256 key, recomputed
//! by both sides from the shared secret plus the nonce and timestamp
//! carried in the envelope. The key itself never crosses the wire.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Raw nonce length in bytes (hex-encoded to 32 chars on the wire).
pub const NONCE_LEN: usize = 16;

/// Separator between key derivation inputs.
const KDF_SEPARATOR: u8 = b'_';

/// A 32-byte AES-256 key derived for a single exchange direction.
///
/// Zeroized on drop; `Debug` output is redacted.
pub struct DerivedKey([u8; KEY_SIZE]);

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

impl DerivedKey {
    /// Wrap raw key bytes. The slice must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(key))
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Derive the AES-256 key for one exchange direction.
///
/// SHA-256 over `secret || "_" || nonce || "_" || timestamp_decimal`.
/// Deterministic: the receiving side recomputes the identical key from
/// the nonce and timestamp in the envelope. No stretching is applied;
/// the digest is the key.
pub fn derive_key(secret: &[u8], nonce: &str, timestamp: i64) -> DerivedKey {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update([KDF_SEPARATOR]);
    hasher.update(nonce.as_bytes());
    hasher.update([KDF_SEPARATOR]);
    hasher.update(timestamp.to_string().as_bytes());
    DerivedKey(hasher.finalize().into())
}

/// Generate a fresh per-message nonce: 16 random bytes, lowercase hex.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

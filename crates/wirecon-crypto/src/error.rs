//! Crypto error types.

/// Errors from cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid base64 in encrypted blob: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Encrypted blob too short: {actual} bytes, need at least {min}")]
    BlobTooShort { min: usize, actual: usize },

    #[error("Ciphertext length {0} is not a multiple of the block size")]
    MisalignedCiphertext(usize),

    #[error("Invalid padding length byte: {0}")]
    InvalidPadding(u8),

    #[error("Decrypted plaintext is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

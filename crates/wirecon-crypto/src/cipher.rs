//! Encrypted blob codec.
//!
//! Frames plaintext as `base64(IV || AES-256-CBC ciphertext)` for transport
//! inside a JSON envelope field. Padding is PKCS#7 with the block cipher's
//! 16-byte block size, applied before encryption; the cipher itself runs
//! unpadded on the pre-padded buffer.

use aes::Aes256;
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::CryptoError;
use crate::key::DerivedKey;

/// AES block size; also the IV length.
pub const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt plaintext into a transportable blob.
///
/// Pads to the block size, encrypts under a fresh random IV, and returns
/// `base64(IV || ciphertext)` with the standard alphabet and no wrapping.
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<String, CryptoError> {
    let mut iv = [0u8; BLOCK_SIZE];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(seal(plaintext, key, &iv))
}

/// Encrypt with a caller-supplied IV, for deterministic test vectors.
#[cfg(any(test, feature = "test-utils"))]
pub fn encrypt_with_iv(plaintext: &str, key: &DerivedKey, iv: &[u8; BLOCK_SIZE]) -> String {
    seal(plaintext, key, iv)
}

fn seal(plaintext: &str, key: &DerivedKey, iv: &[u8; BLOCK_SIZE]) -> String {
    let padded = pkcs7_pad(plaintext.as_bytes());
    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), iv.into())
        .encrypt_padded_vec_mut::<NoPadding>(&padded);

    let mut framed = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    framed.extend_from_slice(iv);
    framed.extend_from_slice(&ciphertext);
    BASE64.encode(framed)
}

/// Decrypt a blob produced by [`encrypt`] (or a compatible peer).
pub fn decrypt(blob: &str, key: &DerivedKey) -> Result<String, CryptoError> {
    let decoded = BASE64.decode(blob)?;
    if decoded.len() < BLOCK_SIZE {
        return Err(CryptoError::BlobTooShort {
            min: BLOCK_SIZE,
            actual: decoded.len(),
        });
    }

    let (iv, ciphertext) = decoded.split_at(BLOCK_SIZE);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::MisalignedCiphertext(ciphertext.len()));
    }
    if ciphertext.is_empty() {
        // An IV with no ciphertext blocks; there is no padding to strip.
        return Err(CryptoError::InvalidPadding(0));
    }
    let iv: [u8; BLOCK_SIZE] = iv
        .try_into()
        .map_err(|_| CryptoError::BlobTooShort {
            min: BLOCK_SIZE,
            actual: decoded.len(),
        })?;

    let padded = Aes256CbcDec::new(key.as_bytes().into(), (&iv).into())
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| CryptoError::MisalignedCiphertext(ciphertext.len()))?;

    let plaintext = pkcs7_unpad(padded)?;
    Ok(String::from_utf8(plaintext)?)
}

/// PKCS#7 pad to the block size. Always pads: an already-aligned input
/// gains a full block of padding, so `pad_len` is in `1..=16`.
fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut padded = data.to_vec();
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip PKCS#7 padding, trusting only the length byte.
///
/// The padding bytes themselves are not cross-checked against `pad_len`;
/// peer implementations of this protocol accept such blobs, and rejecting
/// them here would break wire compatibility.
fn pkcs7_unpad(mut data: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
    let Some(&pad_byte) = data.last() else {
        return Err(CryptoError::InvalidPadding(0));
    };
    let pad_len = pad_byte as usize;
    if pad_len < 1 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(CryptoError::InvalidPadding(pad_byte));
    }
    data.truncate(data.len() - pad_len);
    Ok(data)
}

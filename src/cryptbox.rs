//! Encryption/decryption using AES-128-CBC with a SHA-256 integrity digest
//!
//! This module implements the blob codec:
//! - AES-128-CBC keyed directly by the 16 key bytes, fresh random IV
//! - PKCS#7 block padding (always at least one pad byte)
//! - SHA-256 over the plaintext, hex-encoded, appended as a trailer
//!
//! The binary format is:
//! - iv: 16 bytes
//! - ciphertext: plaintext padded up to a multiple of 16 bytes
//! - digest: 64 ASCII bytes, lowercase hex SHA-256 of the plaintext
//!
//! The digest rides outside the encrypted region. This is hash-then-encrypt
//! with a detached tag, not an AEAD: an attacker who can rewrite both the
//! ciphertext and the digest together is constrained only by needing the
//! hash of a plaintext of their choosing. Known limitation of the format.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Result, ShieldboxError};
use crate::key::Key;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Cipher block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// IV length in bytes.
pub const IV_LEN: usize = 16;

/// Length of the hex-encoded digest trailer in bytes.
pub const DIGEST_HEX_LEN: usize = 64;

/// Shortest structurally possible blob: an IV and a digest trailer. A valid
/// blob is strictly longer since the ciphertext is never empty.
const MIN_FRAME_LEN: usize = IV_LEN + DIGEST_HEX_LEN;

/// Encrypt plaintext under `key` with a fresh random IV
///
/// Returns the binary format: iv(16) + ciphertext + digest_hex(64). Cannot
/// fail: any plaintext length (including zero) and any valid key succeed.
pub fn encrypt(plaintext: &[u8], key: &Key) -> Vec<u8> {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    encrypt_with_iv(plaintext, key, &iv)
}

/// Encrypt plaintext with a caller-supplied IV
///
/// This function is ONLY for tests that need deterministic output. NEVER
/// use it in production - always use [`encrypt`], which draws a fresh IV.
/// Repeating an IV under the same key leaks plaintext block equality in CBC.
pub fn encrypt_with_iv(plaintext: &[u8], key: &Key, iv: &[u8; IV_LEN]) -> Vec<u8> {
    let digest_hex = hex::encode(Sha256::digest(plaintext));
    let ciphertext = Aes128CbcEnc::new(key.as_bytes().into(), iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len() + DIGEST_HEX_LEN);
    blob.extend_from_slice(iv);
    blob.extend_from_slice(&ciphertext);
    blob.extend_from_slice(digest_hex.as_bytes());
    blob
}

/// Decrypt a blob and verify its integrity digest
///
/// Failure kinds, in the order they are detected:
/// - [`ShieldboxError::MalformedBlob`] - the frame is structurally broken
///   before any decryption is attempted
/// - [`ShieldboxError::DecryptionFailed`] - padding was invalid after CBC
///   decryption (wrong key or corrupted ciphertext/IV)
/// - [`ShieldboxError::IntegrityMismatch`] - plaintext was recovered but its
///   recomputed digest disagrees with the stored trailer
///
/// A successful return means the plaintext decrypted under `key` and matches
/// the digest embedded at encryption time. No partial plaintext is ever
/// returned on failure.
pub fn decrypt(blob: &[u8], key: &Key) -> Result<Vec<u8>> {
    if blob.len() < MIN_FRAME_LEN {
        return Err(ShieldboxError::MalformedBlob(
            "too short to hold an IV and digest trailer",
        ));
    }

    let (head, digest_hex) = blob.split_at(blob.len() - DIGEST_HEX_LEN);
    let (iv, ciphertext) = head.split_at(IV_LEN);

    if !digest_hex.iter().all(u8::is_ascii_hexdigit) {
        return Err(ShieldboxError::MalformedBlob("digest trailer is not hex"));
    }
    if ciphertext.is_empty() {
        return Err(ShieldboxError::MalformedBlob("ciphertext is empty"));
    }
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(ShieldboxError::MalformedBlob(
            "ciphertext is not a whole number of cipher blocks",
        ));
    }

    let mut iv_bytes = [0u8; IV_LEN];
    iv_bytes.copy_from_slice(iv);

    let plaintext = Aes128CbcDec::new(key.as_bytes().into(), (&iv_bytes).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| ShieldboxError::DecryptionFailed)?;

    // Byte-for-byte and case-sensitive: the trailer is lowercase hex by
    // construction, so an uppercase trailer fails here, not at the hex gate.
    let recomputed = hex::encode(Sha256::digest(&plaintext));
    if recomputed.as_bytes() != digest_hex {
        return Err(ShieldboxError::IntegrityMismatch);
    }

    Ok(plaintext)
}

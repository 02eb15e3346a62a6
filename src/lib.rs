//! Shieldbox - image encryption with per-file keys and integrity digests
//!
//! Every encryption generates a fresh 16-character key; the resulting blob
//! bundles the IV, the AES-128-CBC ciphertext, and a SHA-256 digest of the
//! plaintext. Decryption verifies the digest before handing plaintext back.

#![forbid(unsafe_code)]

pub mod cryptbox;
pub mod error;
pub mod file_ops;
pub mod key;
pub mod keysource;
pub mod sniff;

use std::io;

use thiserror::Error;

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShieldboxError>;

/// The closed set of failure kinds surfaced by this crate.
///
/// The first three variants are the only failures the blob codec itself can
/// produce; the remainder belong to the surrounding file and key-entry glue.
/// Callers branch on the variant, never on message text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShieldboxError {
    /// A structural precondition on the blob was violated before any
    /// decryption was attempted: too short, non-hex digest trailer, or a
    /// ciphertext that is empty or not a whole number of cipher blocks.
    /// Never transient; always an input bug.
    #[error("malformed encrypted blob: {0}")]
    MalformedBlob(&'static str),

    /// Block padding was invalid after CBC decryption. Near-certain
    /// indicator of a wrong key or corrupted ciphertext/IV; the scheme
    /// cannot reliably tell the two apart.
    #[error("decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    /// Padding removal succeeded but the recomputed digest disagrees with
    /// the digest stored at encryption time.
    #[error("integrity check failed: decrypted data does not match its digest")]
    IntegrityMismatch,

    /// The supplied key text failed validation.
    #[error("key must be exactly {} printable ASCII characters", crate::key::KEY_LEN)]
    InvalidKey,

    /// The key could not be obtained from the configured reader.
    #[error("could not obtain key: {0}")]
    KeyUnavailable(String),

    /// Input offered for encryption carries no recognized image signature.
    #[error("input not recognized as a supported image format")]
    UnrecognizedImage,

    /// Interaction with the filesystem or stdio failed.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

//! Key generation and validation
//!
//! A key is exactly 16 printable ASCII characters, used directly as the 16
//! raw key bytes of the cipher. Generated keys draw from the 62-character
//! alphanumeric alphabet so they can be transcribed by hand. The key is
//! shown to the user once and never persisted; whoever loses it loses the
//! blob.

use std::fmt;
use std::str::FromStr;

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroize;

use crate::error::ShieldboxError;

/// Key length in bytes. Load-bearing: AES-128 takes exactly 16 key bytes.
pub const KEY_LEN: usize = 16;

/// A validated 16-byte symmetric key.
///
/// The bytes are wiped on drop, and `Debug` is redacted so a key cannot
/// leak through error formatting.
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Generate a fresh key from the OS entropy source.
    ///
    /// Draws each character independently and uniformly from {a-z, A-Z,
    /// 0-9}. Entropy-source starvation aborts the process; it is not a
    /// recoverable condition.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        for b in &mut bytes {
            *b = OsRng.sample(Alphanumeric);
        }
        Key(bytes)
    }

    /// The raw key bytes, as fed to the cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl FromStr for Key {
    type Err = ShieldboxError;

    /// Accepts exactly [`KEY_LEN`] printable ASCII characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != KEY_LEN || !bytes.iter().all(u8::is_ascii_graphic) {
            return Err(ShieldboxError::InvalidKey);
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Key(key))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bytes are ASCII by construction.
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(..)")
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_key_length_and_alphabet() {
        for _ in 0..100 {
            let key = Key::generate();
            assert_eq!(key.as_bytes().len(), KEY_LEN);
            assert!(key.as_bytes().iter().all(u8::is_ascii_alphanumeric));
        }
    }

    #[test]
    fn test_generated_keys_do_not_collide() {
        // 62^16 keys; any collision in 10k draws means the RNG is broken.
        let keys: HashSet<String> = (0..10_000).map(|_| Key::generate().to_string()).collect();
        assert_eq!(keys.len(), 10_000);
    }

    #[test]
    fn test_parse_valid_key() {
        let key: Key = "A1b2C3d4E5f6G7h8".parse().unwrap();
        assert_eq!(key.as_bytes(), b"A1b2C3d4E5f6G7h8");
        assert_eq!(key.to_string(), "A1b2C3d4E5f6G7h8");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("shortkey".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
        assert!("seventeen chars!!".parse::<Key>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_printable_ascii() {
        // right length, wrong alphabet
        assert!("ключключ".parse::<Key>().is_err());
        assert!("with space chars".parse::<Key>().is_err());
        assert!("tab\tin-the-key16".parse::<Key>().is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Key::generate();
        assert_eq!(format!("{:?}", key), "Key(..)");
    }
}

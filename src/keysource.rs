//! Key reading functionality

use std::io::{self, IsTerminal, Read, Write};

use zeroize::Zeroizing;

use crate::error::{Result, ShieldboxError};
use crate::key::Key;

/// Trait for obtaining a decryption key from various sources
pub trait KeyReader {
    /// Read and validate a key.
    fn read_key(&mut self) -> Result<Key>;
}

/// Returns a fixed key (for testing)
pub struct ConstantKeyReader {
    key: Zeroizing<String>,
}

impl ConstantKeyReader {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }
}

impl KeyReader for ConstantKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        self.key.parse()
    }
}

/// Reads the key from any io::Read source
pub struct ReaderKeyReader {
    reader: Box<dyn Read>,
}

impl ReaderKeyReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl KeyReader for ReaderKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        let mut data = Zeroizing::new(Vec::new());
        self.reader.read_to_end(&mut data).map_err(|e| ShieldboxError::Io {
            context: "error reading key from input".to_string(),
            source: e,
        })?;
        parse_key_bytes(&data)
    }
}

/// Reads the key from the terminal with no echo
#[derive(Default)]
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl KeyReader for TerminalKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        if !io::stdin().is_terminal() {
            return Err(ShieldboxError::KeyUnavailable(
                "cannot prompt for key - stdin is not a terminal".to_string(),
            ));
        }

        io::stderr()
            .write_all(b"Key (shieldbox): ")
            .and_then(|()| io::stderr().flush())
            .map_err(|e| ShieldboxError::Io {
                context: "failed to write key prompt".to_string(),
                source: e,
            })?;

        // Read the key *without echo*
        let entered = Zeroizing::new(rpassword::read_password().map_err(|e| {
            ShieldboxError::KeyUnavailable(format!("failure reading key: {}", e))
        })?);
        entered.parse()
    }
}

/// Parse key bytes, tolerating a single trailing newline from piped input.
fn parse_key_bytes(data: &[u8]) -> Result<Key> {
    let mut data = data;
    if let Some(stripped) = data.strip_suffix(b"\n") {
        data = stripped;
    }
    if let Some(stripped) = data.strip_suffix(b"\r") {
        data = stripped;
    }
    let text = std::str::from_utf8(data).map_err(|_| ShieldboxError::InvalidKey)?;
    text.parse()
}

//! File encryption/decryption operations
//!
//! High-level operations tying the codec to the filesystem: read an image,
//! encrypt it under a freshly generated key, and later decrypt a blob with
//! a key obtained from a [`KeyReader`]. The codec itself never touches the
//! filesystem.

use std::fs;
use std::io;
use std::path::Path;

use crate::cryptbox;
use crate::error::{Result, ShieldboxError};
use crate::key::Key;
use crate::keysource::KeyReader;
use crate::sniff;

/// Encrypt an image file under a freshly generated key
///
/// Reads `input_path`, refuses input without a recognized image signature,
/// and writes the encrypted blob to `output_path` with mode 0o600 on Unix.
/// Returns the generated key; it is never persisted anywhere, so this return
/// value is the caller's only chance to show it to the user.
pub fn encrypt_file(input_path: &Path, output_path: &Path) -> Result<Key> {
    let plaintext = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    if sniff::image_extension(&plaintext).is_none() {
        return Err(ShieldboxError::UnrecognizedImage);
    }

    let key = Key::generate();
    let blob = cryptbox::encrypt(&plaintext, &key);
    write_file_secure(output_path, &blob)?;
    Ok(key)
}

/// Decrypt a previously produced blob
///
/// Reads the blob from `input_path`, obtains the key from `key_reader`, and
/// writes the verified plaintext to `output_path` with mode 0o600 on Unix.
/// Returns the detected image extension of the plaintext, or `None` when the
/// decrypted bytes carry no known image signature (they are still written
/// as-is). Nothing is written unless decryption and verification succeed.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    key_reader: &mut dyn KeyReader,
) -> Result<Option<&'static str>> {
    let blob = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let key = key_reader.read_key()?;
    let plaintext = cryptbox::decrypt(&blob, &key)?;
    write_file_secure(output_path, &plaintext)?;
    Ok(sniff::image_extension(&plaintext))
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| io_error(format!("failed to open {}", path.display()), e))?;
        file.write_all(contents)
            .map_err(|e| io_error(format!("failed to write {}", path.display()), e))
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .map_err(|e| io_error(format!("failed to write {}", path.display()), e))
    }
}

fn read_error(path: &Path, source: io::Error) -> ShieldboxError {
    io_error(format!("failed to read from {}", path.display()), source)
}

fn io_error(context: String, source: io::Error) -> ShieldboxError {
    ShieldboxError::Io { context, source }
}

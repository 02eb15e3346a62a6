//! Shieldbox CLI - image encryption with per-file keys
//!
//! Command-line interface for encrypting an image under a freshly generated
//! 16-character key and decrypting a previously produced blob given that
//! key. The key is printed exactly once at encryption time and never stored.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use shieldbox::file_ops;
use shieldbox::keysource::{KeyReader, ReaderKeyReader, TerminalKeyReader};

#[derive(Parser)]
#[command(name = "shieldbox")]
#[command(version)]
#[command(about = "Image encryption with per-file keys and tamper detection.", long_about = None)]
struct Cli {
    /// Read the key from stdin instead of from terminal
    #[arg(long, global = true)]
    key_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an image under a freshly generated key
    #[command(alias = "e")]
    Encrypt {
        /// Path to the image file to encrypt
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the encrypted blob to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decrypt an encrypted blob with its key
    #[command(alias = "d")]
    Decrypt {
        /// Path to the encrypted blob
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the decrypted image to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt { input, output } => {
            file_ops::encrypt_file(&input, &output).map(|key| {
                // The only time the key is ever shown; it is not persisted.
                println!("Key: {}", key);
            })
        }
        Commands::Decrypt { input, output } => {
            let mut reader = get_key_reader(cli.key_stdin);
            file_ops::decrypt_file(&input, &output, &mut *reader).map(|detected| {
                if detected.is_none() {
                    eprintln!(
                        "warning: decrypted data not recognized as an image; wrote raw bytes"
                    );
                }
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn get_key_reader(use_stdin: bool) -> Box<dyn KeyReader> {
    if use_stdin {
        Box::new(ReaderKeyReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalKeyReader::new())
    }
}

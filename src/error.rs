//! Error types for the biller file reader.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Errors that can occur while reading biller information files.
///
/// Rows with the wrong number of fields and unknown payment codes are not
/// errors; they are handled inside the parser.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The file pattern could not be turned into a list of paths
    #[error("`{pattern}` is invalid glob pattern: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The decryption binary could not be started
    #[error("Unable to start decryption binary `{}`: {source}", .binary.display())]
    DecryptionUnavailable {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The csv reader failed while splitting decrypted plaintext into rows
    #[error("Malformed input in {}: {source}", .path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A seven-field row whose values cannot be read; the parser logs and
    /// skips these
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    /// A transaction was built without one of its required fields
    #[error("Transaction is missing required field `{0}`")]
    IncompleteRecord(&'static str),

    /// Failed to read or write a local file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

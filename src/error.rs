//! Error types for the donation runner.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for donation runner operations
pub type Result<T> = std::result::Result<T, DonationError>;

/// Errors that can occur while decrypting or processing donations.
#[derive(Error, Debug)]
pub enum DonationError {
    /// I/O failure while streaming bytes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The source file could not be opened
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The destination file could not be created
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source and destination are the same file
    #[error("Refusing to decrypt {} onto itself", path.display())]
    SamePath { path: PathBuf },
}

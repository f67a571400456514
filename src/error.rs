//! Custom error types for imagetest.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the imagetest library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the image payload from disk.
    #[error("failed to read image from {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for imagetest operations.
pub type Result<T> = std::result::Result<T, Error>;

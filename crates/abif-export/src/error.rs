//! Error types for table export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing a trace table.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output path has no file name to write to.
    #[error("invalid output path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;

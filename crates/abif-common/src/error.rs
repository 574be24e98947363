//! Error types for abif-common.

use thiserror::Error;

/// Common error type for abif stream operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of stream reached while reading.
    #[error("unexpected end of stream at offset {position}: needed {needed} bytes")]
    UnexpectedEof { position: u64, needed: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

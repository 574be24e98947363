//! Error types for ABIF parsing.

use thiserror::Error;

use crate::Tag;

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file is structurally invalid.
    Format,
    /// A required tagged entry is absent.
    MissingField,
    /// The underlying stream failed or ended early.
    Io,
    /// The file is valid but a required field uses a vendor/user type.
    UnsupportedType,
}

/// Errors that can occur when reading ABIF containers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] abif_common::Error),

    /// Magic bytes are not "ABIF".
    #[error("not a recognized ABIF container: magic {actual:?}")]
    NotAbif { actual: Vec<u8> },

    /// Element type tag outside the known vocabulary.
    #[error("unknown element type {element_type} at offset {offset}")]
    UnknownElementType { element_type: i16, offset: u64 },

    /// Element or entry count below zero.
    #[error("negative element count {count} at offset {offset}")]
    NegativeCount { count: i32, offset: u64 },

    /// Data offset below zero for an externally stored entry.
    #[error("{name} ({number}): negative data offset {offset}")]
    NegativeOffset { name: Tag, number: i32, offset: i32 },

    /// Required entry not present in the directory.
    #[error("entry {name} ({number}) not found")]
    MissingField { name: Tag, number: i32 },

    /// Required entry uses a vendor/user element type.
    #[error("entry {name} ({number}) has unsupported user type {element_type}")]
    UnsupportedType {
        name: Tag,
        number: i32,
        element_type: i16,
    },

    /// Entry decoded to a kind the caller cannot use.
    #[error("entry {name} ({number}): expected {expected}, found {actual}")]
    UnexpectedKind {
        name: Tag,
        number: i32,
        expected: &'static str,
        actual: &'static str,
    },

    /// Trace channels of different lengths.
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: i32,
        expected: usize,
        actual: usize,
    },

    /// Failure while decoding a specific entry.
    #[error("entry {name} ({number}) at offset {offset}: {source}")]
    Entry {
        name: Tag,
        number: i32,
        offset: u64,
        source: Box<Error>,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Common(abif_common::Error::InvalidMagic { .. }) => ErrorKind::Format,
            Self::Common(_) => ErrorKind::Io,
            Self::NotAbif { .. }
            | Self::UnknownElementType { .. }
            | Self::NegativeCount { .. }
            | Self::NegativeOffset { .. }
            | Self::UnexpectedKind { .. }
            | Self::ChannelLengthMismatch { .. } => ErrorKind::Format,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::Entry { source, .. } => source.kind(),
        }
    }
}

/// Result type for ABIF operations.
pub type Result<T> = std::result::Result<T, Error>;

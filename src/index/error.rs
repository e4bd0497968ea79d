//! Error types for index persistence.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted index data.
///
/// Nothing here is raised at query time; a lookup that finds nothing is an
/// empty result, not an error.
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error during read/write, including a truncated stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not start with the index magic.
    #[error("Not a Dagger index: bad magic {found:?}")]
    BadMagic { found: [u8; 4] },

    /// The stream was written by a different index format version.
    #[error("Unsupported index format version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    /// A record names a relation data type this build does not know.
    #[error("Unknown relation data type id: {0}")]
    UnknownDataType(u8),

    /// A record's qualified name is not valid UTF-8.
    #[error("Invalid UTF-8 in index record: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A record's reader stopped before the end of its payload.
    #[error("Index record has {0} trailing bytes")]
    TrailingBytes(usize),
}

impl IndexError {
    /// Create a truncation error for a payload that ended early.
    pub fn truncated(expected: usize, found: usize) -> Self {
        Self::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("expected {expected} bytes, found {found}"),
        ))
    }
}

/// Result alias for index persistence.
pub type Result<T> = std::result::Result<T, IndexError>;

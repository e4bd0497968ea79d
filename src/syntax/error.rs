//! Error types for reading source files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when handing a file to the header reader.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The file is neither Java nor Kotlin.
    #[error("Unsupported source file: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

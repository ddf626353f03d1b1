//! Error types for preset decoding and encoding.

use thiserror::Error;

/// Errors that can occur when decoding or encoding a preset container.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content is not well-formed XML after the decompression attempt.
    #[error("malformed preset document: {0}")]
    MalformedDocument(String),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for preset codec operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for preset rewriting.

use thiserror::Error;

/// Errors that can occur while rewriting a single preset.
///
/// Every variant is fatal for that one preset only; batch drivers catch at
/// the per-preset boundary and keep going.
#[derive(Debug, Error)]
pub enum Error {
    /// Codec error (malformed document, bad UTF-8, XML writing).
    #[error("{0}")]
    Preset(#[from] maxport_preset::Error),

    /// Filesystem read/write error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rewriter operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for docflow.

use std::io;
use thiserror::Error;

/// Result type alias for docflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a conversion.
///
/// The conversion itself is total: content that cannot be used degrades to
/// defaults. Errors cover I/O, malformed input and missing collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialisation error for documents, options or output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A converter was built from a registry without any converters.
    #[error("No node converters registered")]
    MissingConverters,

    /// The document tree breaks a structural rule.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error while projecting flow blocks (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

//! Error types for sheet-reader-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening a document or reading its cells
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed column letters, column index or row number
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// The underlying document could not be read or parsed
    #[error("Failed to open document: {0}")]
    DocumentOpen(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The document declares more than one worksheet
    #[error("Multiple sheets not supported (document has {0})")]
    MultipleSheetsUnsupported(usize),

    /// The worksheet content could not be located
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// A shared-string cell could not be resolved against the table
    #[error("Shared string resolution failed: {0}")]
    SharedStringResolution(String),

    /// Coercion was requested for a kind the engine does not model
    #[error("No support for target type '{0}'")]
    UnsupportedTargetType(String),

    /// Cell text could not be converted (strict policy only)
    #[error("Cell {reference}: '{text}' is not a valid {kind}")]
    MalformedValue {
        reference: String,
        kind: &'static str,
        text: String,
    },

    /// The reader was closed
    #[error("Reader is closed")]
    Closed,
}

impl Error {
    /// Wrap any error raised by a document source as [`Error::DocumentOpen`]
    pub fn document_open<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::DocumentOpen(err.into())
    }
}

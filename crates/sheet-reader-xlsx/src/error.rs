//! XLSX error types

use thiserror::Error;

/// Result type for XLSX package reads
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors raised while reading an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The file could not be opened or read
    #[error("I/O failure reading package: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not a readable zip archive
    #[error("Not a zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A package part is not well-formed XML
    #[error("Malformed XML in package part: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive is not an Office Open XML spreadsheet
    #[error("Not an XLSX package: {0}")]
    InvalidFormat(String),

    /// A part the workbook needs is absent from the archive
    #[error("Package part not found: {0}")]
    MissingPart(String),

    /// A worksheet's content part could not be located
    #[error("Worksheet '{0}' has no content part")]
    MissingWorksheet(String),
}

/// Package failures surface as [`Error::DocumentOpen`](sheet_reader_core::Error::DocumentOpen),
/// except a missing worksheet part.
impl From<XlsxError> for sheet_reader_core::Error {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::MissingWorksheet(name) => sheet_reader_core::Error::WorksheetNotFound(name),
            other => sheet_reader_core::Error::document_open(other),
        }
    }
}

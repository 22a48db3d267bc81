//! # sheet-reader-xlsx
//!
//! XLSX (Office Open XML) document source for sheet-reader.
//!
//! [`XlsxSource`] walks the package parts (workbook, relationships, worksheet and
//! shared strings) and yields the flat cell records that
//! [`sheet_reader_core::Document`] indexes.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxSource;

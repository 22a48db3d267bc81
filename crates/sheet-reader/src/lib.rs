//! # sheet-reader
//!
//! Read cell values from single-worksheet XLSX documents.
//!
//! Cells are addressed by column letters (or a 1-based column number) and a
//! 1-based row. Values come back either as raw text, with shared strings
//! resolved, or coerced to a Rust type.
//!
//! ## Features
//!
//! - Raw cell text with shared and inline strings resolved
//! - Typed reads into `String`, `bool`, `char`, integers, floats, `Decimal`,
//!   date-times and time-of-day durations, plus their `Option` forms
//! - Target kinds chosen at runtime by type name
//! - 1900 and 1904 date systems
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet_reader::prelude::*;
//!
//! let mut reader = SheetReader::open("allTypes.xlsx").unwrap();
//!
//! let label = reader.get_value("B", 2).unwrap();
//! let amount: f64 = reader.get_typed_value("B", 4).unwrap();
//! let missing: Option<i32> = reader.get_typed_value("B", 1).unwrap();
//!
//! reader.close();
//! ```

pub mod prelude;
pub mod reader;

pub use reader::{SheetReader, StreamOwnership};

// Re-export core types
pub use sheet_reader_core::{
    column_to_index, index_to_column, CellRef, CellType, CoercionPolicy, Column, DateSystem,
    DocumentSource, Error, FromCell, IntoColumn, RawCell, ReadOptions, Result, ScalarKind,
    TypedValue, ValueKind,
};

// Re-export the XLSX source
pub use sheet_reader_xlsx::{XlsxError, XlsxSource};

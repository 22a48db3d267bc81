//! # sheet-reader-core
//!
//! Core logic of the sheet-reader library.
//!
//! This crate provides:
//! - [`Column`] and [`CellRef`] - Bijective base-26 column codec and A1-style references
//! - [`RawCell`] - A cell record as yielded by a document source
//! - [`DocumentSource`] - The seam to the package/XML layer, plus an in-memory [`MemorySource`]
//! - [`CellIndex`] - Reference lookup over the single worksheet's cells
//! - [`Document`] - Raw value resolution (shared strings included) and typed coercion
//!
//! ## Example
//!
//! ```rust
//! use sheet_reader_core::{Document, MemorySource, RawCell, CellType, ReadOptions};
//!
//! let source = MemorySource::new()
//!     .sheet("Sheet1", vec![
//!         RawCell::new("B2", Some(CellType::SharedString), "0"),
//!         RawCell::new("B3", None, "42"),
//!     ])
//!     .shared_strings(vec!["hello".to_string()]);
//!
//! let doc = Document::open(source, ReadOptions::default()).unwrap();
//! assert_eq!(doc.raw_value("B", 2).unwrap(), Some("hello"));
//! assert_eq!(doc.typed_value::<i32>(2, 3).unwrap(), 42);
//! assert_eq!(doc.typed_value::<Option<i32>>("B", 9).unwrap(), None);
//! ```

pub mod cell;
pub mod column;
pub mod document;
pub mod error;
pub mod index;
pub mod options;
pub mod source;
pub mod value;

pub use cell::{CellType, RawCell};
pub use column::{column_to_index, index_to_column, CellRef, Column, IntoColumn};
pub use document::Document;
pub use error::{Error, Result};
pub use index::CellIndex;
pub use options::{CoercionPolicy, DateSystem, ReadOptions};
pub use source::{DocumentSource, MemorySource, SharedStringTable, SheetInfo};
pub use value::{FromCell, ScalarKind, TypedValue, ValueKind};

//! Prelude module - common imports for sheet-reader users
//!
//! ```rust
//! use sheet_reader::prelude::*;
//! ```

pub use crate::{
    CellRef,
    // Cell types
    CellType,
    // Options
    CoercionPolicy,
    Column,
    DateSystem,
    // Error types
    Error,
    // Typed reads
    FromCell,
    RawCell,
    ReadOptions,
    Result,
    // Main types
    SheetReader,
    StreamOwnership,
    TypedValue,
    ValueKind,
};

//! Typed cell values
//!
//! This module contains:
//! - [`TypedValue`] - The result of converting cell text to a logical kind
//! - [`ValueKind`] - The closed set of kinds the conversion supports
//! - [`FromCell`] - Compile-time mapping from Rust types to kinds

mod coerce;
mod kind;
pub mod numeric;
pub mod serial;

pub use coerce::convert;
pub use kind::{ScalarKind, ValueKind};

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use crate::options::DateSystem;

/// A cell value converted to a logical kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// No value (blank cell, or text that did not convert)
    Empty,
    /// Text
    String(String),
    /// Boolean
    Boolean(bool),
    /// Single character
    Char(char),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    /// Calendar date-time
    DateTime(NaiveDateTime),
    /// Time of day as a duration from midnight
    Duration(Duration),
}

/// A Rust type that a cell can be read as
///
/// Plain types read blank cells as their zero value; `Option<T>` reads them as `None`.
pub trait FromCell: Sized {
    /// Logical kind the cell text is converted to
    const KIND: ValueKind;

    /// Extract from a value produced for [`Self::KIND`]
    fn from_value(value: TypedValue) -> Self;
}

/// Value a blank cell reads as for a non-nullable date-time: serial zero
fn blank_datetime() -> NaiveDateTime {
    DateSystem::Excel1900
        .epoch()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
}

macro_rules! impl_from_cell {
    ($ty:ty, $kind:ident, $blank:expr) => {
        impl FromCell for $ty {
            const KIND: ValueKind = ValueKind::new(ScalarKind::$kind);

            fn from_value(value: TypedValue) -> Self {
                match value {
                    TypedValue::$kind(v) => v,
                    _ => $blank,
                }
            }
        }

        impl FromCell for Option<$ty> {
            const KIND: ValueKind = ValueKind::nullable(ScalarKind::$kind);

            fn from_value(value: TypedValue) -> Self {
                match value {
                    TypedValue::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_cell!(String, String, String::new());
impl_from_cell!(bool, Boolean, false);
impl_from_cell!(char, Char, '\0');
impl_from_cell!(i16, Int16, 0);
impl_from_cell!(i32, Int32, 0);
impl_from_cell!(i64, Int64, 0);
impl_from_cell!(f32, Float32, 0.0);
impl_from_cell!(f64, Float64, 0.0);
impl_from_cell!(Decimal, Decimal, Decimal::ZERO);
impl_from_cell!(NaiveDateTime, DateTime, blank_datetime());
impl_from_cell!(Duration, Duration, Duration::zero());

//! Conversion of cell text to a scalar kind

use super::kind::ScalarKind;
use super::numeric::{parse_decimal, parse_f32, parse_f64, parse_integer};
use super::serial::{serial_to_datetime, serial_to_time_of_day};
use super::TypedValue;
use crate::options::DateSystem;

/// Convert non-empty cell text to `kind`
///
/// Returns `None` when the text does not convert. Booleans are stored as
/// integers (`1` is true, any other integer false); dates and durations as
/// serial day numbers.
pub fn convert(text: &str, kind: ScalarKind, date_system: DateSystem) -> Option<TypedValue> {
    let value = match kind {
        ScalarKind::String => TypedValue::String(text.to_string()),
        ScalarKind::Boolean => TypedValue::Boolean(parse_integer::<i32>(text)? == 1),
        ScalarKind::Char => TypedValue::Char(text.chars().next()?),
        ScalarKind::Int16 => TypedValue::Int16(parse_integer(text)?),
        ScalarKind::Int32 => TypedValue::Int32(parse_integer(text)?),
        ScalarKind::Int64 => TypedValue::Int64(parse_integer(text)?),
        ScalarKind::Float32 => TypedValue::Float32(parse_f32(text)?),
        ScalarKind::Float64 => TypedValue::Float64(parse_f64(text)?),
        ScalarKind::Decimal => TypedValue::Decimal(parse_decimal(text)?),
        ScalarKind::DateTime => {
            TypedValue::DateTime(serial_to_datetime(parse_f64(text)?, date_system)?)
        }
        ScalarKind::Duration => {
            TypedValue::Duration(serial_to_time_of_day(parse_f64(text)?, date_system)?)
        }
    };
    Some(value)
}

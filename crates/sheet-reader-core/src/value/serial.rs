//! Serial date/time conversion
//!
//! Spreadsheets store dates as a day count from an epoch, with the time of day
//! as the fractional part. Conversion follows the OLE Automation rules used by
//! spreadsheet tools: serial 60 is 1900-02-28 and no day is inserted for the
//! fictional 1900-02-29.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::options::DateSystem;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Smallest serial accepted (exclusive): 0100-01-01
const MIN_SERIAL: f64 = -657_435.0;

/// Largest serial accepted (exclusive): 10000-01-01
const MAX_SERIAL: f64 = 2_958_466.0;

/// Convert a serial number to a calendar date-time, rounded to the millisecond
///
/// Returns `None` for serials outside the representable range.
pub fn serial_to_datetime(serial: f64, system: DateSystem) -> Option<NaiveDateTime> {
    if !(serial > MIN_SERIAL && serial < MAX_SERIAL) {
        return None;
    }

    let half = if serial >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (serial * MILLIS_PER_DAY as f64 + half) as i64;

    // Negative serials count whole days backwards but the fraction still moves
    // forward from midnight: -1.25 is 1899-12-29 06:00.
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }

    let epoch = system.epoch().and_hms_opt(0, 0, 0)?;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a serial number to its time-of-day portion, discarding whole days
pub fn serial_to_time_of_day(serial: f64, system: DateSystem) -> Option<Duration> {
    let datetime = serial_to_datetime(serial, system)?;
    let time = datetime.time();
    Some(
        Duration::seconds(time.num_seconds_from_midnight() as i64)
            + Duration::nanoseconds(time.nanosecond() as i64),
    )
}

//! TLE epoch field decoding, `YYDDD.DDDDDDDD` to an absolute timestamp

use crate::parser::parse_epoch_field;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};
use tletypes::prelude::*;
use tracing::debug;

/// Two-digit TLE years are taken to be in the 21st century
pub const EPOCH_CENTURY: i32 = 2000;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EpochError {
    #[error("TLE line 1 is too short to hold an epoch field")]
    MissingField,
    #[error("Malformed epoch field '{field}'. {reason}")]
    Malformed { field: String, reason: String },
    #[error("Epoch day of year {0} is outside [1, 367)")]
    DayOutOfRange(f64),
    #[error("Epoch day fraction {0} does not give a valid time of day")]
    TimeOfDay(f64),
}

/// Decode the epoch of a TLE set from its line 1 epoch field
pub fn decode_epoch(tle: &TwoLineElementSet) -> Result<Epoch, EpochError> {
    let field = tle.epoch_field().ok_or(EpochError::MissingField)?;
    decode_epoch_field(field)
}

pub fn decode_epoch_field(field: &str) -> Result<Epoch, EpochError> {
    let (_, (yy, day)) = parse_epoch_field(field).map_err(|e| EpochError::Malformed {
        field: field.to_string(),
        reason: e.to_string(),
    })?;
    let epoch = fractional_day_to_timestamp(EPOCH_CENTURY + i32::from(yy), day)?;
    debug!(field, %epoch, "Decoded TLE epoch");
    Ok(epoch)
}

/// Day 1.0 is January 1st 00:00:00.000.
/// Each of hour, minute, second and millisecond is truncated from the
/// remainder of the previous stage, no rounding is applied.
fn fractional_day_to_timestamp(year: i32, fractional_day: f64) -> Result<Epoch, EpochError> {
    if !(1.0..367.0).contains(&fractional_day) {
        return Err(EpochError::DayOutOfRange(fractional_day));
    }

    let day_of_year = fractional_day.trunc() as u64;
    let date = NaiveDate::from_yo_opt(year, 1)
        .and_then(|jan1| jan1.checked_add_days(Days::new(day_of_year - 1)))
        .ok_or(EpochError::DayOutOfRange(fractional_day))?;

    let day_fraction = fractional_day - day_of_year as f64;
    let (hour, minute, sec, msec) = split_day_fraction(day_fraction);
    let time = NaiveTime::from_hms_milli_opt(hour, minute, sec, msec)
        .ok_or(EpochError::TimeOfDay(day_fraction))?;

    Ok(Epoch::from(date.and_time(time)))
}

/// Hour, minute, second and millisecond of a fraction of a day in `[0, 1)`.
/// Each stage is clamped to its unit so float rounding can't carry into
/// the next one.
fn split_day_fraction(day_fraction: f64) -> (u32, u32, u32, u32) {
    let hour_fraction = day_fraction * 24.0;
    let hour = hour_fraction.floor().clamp(0.0, 23.0);
    let minute_fraction = (hour_fraction - hour) * 60.0;
    let minute = minute_fraction.floor().clamp(0.0, 59.0);
    let secs_fraction = (minute_fraction - minute) * 60.0;
    let sec = secs_fraction.floor().clamp(0.0, 59.0);
    let msecs_fraction = (secs_fraction - sec) * 1000.0;
    let msec = msecs_fraction.floor().clamp(0.0, 999.0);

    (hour as u32, minute as u32, sec as u32, msec as u32)
}

/// Inverse of [`decode_epoch_field`], to 8 fractional day digits
pub fn encode_epoch_field(t: &Timestamp) -> String {
    let yy = t.year().rem_euclid(100);
    let secs = f64::from(t.num_seconds_from_midnight())
        + f64::from(t.nanosecond().min(999_999_999)) / 1e9;
    let day = f64::from(t.ordinal()) + secs / SECONDS_PER_DAY;
    format!("{yy:02}{day:012.8}")
}

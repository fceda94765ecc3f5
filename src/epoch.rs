//! Conversions between Julian Dates and calendar instants.
//!
//! The catalog reports osculating epochs as Julian Dates while queries are
//! made at calendar instants. The two are related by the fixed linear map
//! that places JD 2440587.5 at the Unix epoch, with one Julian day equal to
//! 86 400 000 ms. Leap seconds and the TT/UTC offset are ignored.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::types::{MS_PER_DAY, UNIX_EPOCH_JD};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EpochError {
    #[error("Julian Date {0} is not finite")]
    NonFinite(f64),

    #[error("Julian Date {0} is outside the representable calendar range")]
    OutOfRange(f64),

    #[error("invalid calendar date {0:?}")]
    InvalidDate(String),
}

/// Calendar instant corresponding to Julian Date `jd`, to the millisecond.
pub fn julian_date_to_instant(jd: f64) -> Result<DateTime<Utc>, EpochError> {
    if !jd.is_finite() {
        return Err(EpochError::NonFinite(jd));
    }

    let millis = ((jd - UNIX_EPOCH_JD) * MS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(EpochError::OutOfRange(jd));
    }

    DateTime::from_timestamp_millis(millis as i64).ok_or(EpochError::OutOfRange(jd))
}

/// Julian Date of a calendar instant.
pub fn instant_to_julian_date(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

/// Signed, fractional number of days from `from` to `to`.
///
/// Negative when `to` precedes `from`, e.g. when propagating a body backward
/// from an element epoch that postdates the query.
pub fn day_offset(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// `instant` shifted by a signed, fractional number of days (millisecond resolution).
pub fn add_days(instant: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, EpochError> {
    if !days.is_finite() {
        return Err(EpochError::NonFinite(days));
    }
    let millis = (days * MS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(EpochError::OutOfRange(days));
    }
    TimeDelta::try_milliseconds(millis as i64)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or(EpochError::OutOfRange(days))
}

/// Midnight UTC of a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(date: &str) -> Result<DateTime<Utc>, EpochError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| EpochError::InvalidDate(date.to_string()))?;
    day.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| EpochError::InvalidDate(date.to_string()))
}

//! Publication date validation and normalization.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error_handling::XkcdError;

/// Parses one wire date component as a base-10 `i32`.
///
/// An optional leading sign is accepted; whitespace, decimals and empty
/// strings are not.
pub(crate) fn parse_component(field: &'static str, raw: &str) -> Result<i32, XkcdError> {
    raw.parse::<i32>()
        .map_err(|_| XkcdError::InvalidDateComponent {
            field,
            value: raw.to_string(),
        })
}

/// Returns midnight UTC of `year-month-day`, normalizing out-of-range parts.
///
/// Months outside 1..=12 carry into the year first, then the day is applied
/// as an offset from the first of that month, so `day = 32` of January is
/// February 1 and `day = 0` is the last day of the previous month.
///
/// Returns `None` when the result falls outside the range chrono can represent.
pub(crate) fn midnight_utc(year: i32, month: i32, day: i32) -> Option<DateTime<Utc>> {
    let month0 = i64::from(month) - 1;
    let year = i32::try_from(i64::from(year) + month0.div_euclid(12)).ok()?;
    let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first_of_month.checked_add_signed(Duration::days(i64::from(day) - 1))?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

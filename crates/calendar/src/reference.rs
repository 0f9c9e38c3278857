//! Reference-date convention for monthly and quarterly statistics.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Day of the month used to stamp every reference period.
///
/// Payroll surveys measure the pay period that includes the 12th, so a
/// reference month is represented by that day.
pub const REFERENCE_DAY: u32 = 12;

/// Returns the reference date (day [`REFERENCE_DAY`]) for a year and month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12, or
/// [`CalendarError::InvalidDate`] if the year is outside chrono's range.
///
/// # Example
///
/// ```
/// use vintage_calendar::reference_date;
///
/// let d = reference_date(2023, 6).unwrap();
/// assert_eq!(d.to_string(), "2023-06-12");
/// ```
pub fn reference_date(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    NaiveDate::from_ymd_opt(year, month, REFERENCE_DAY).ok_or(CalendarError::InvalidDate {
        year,
        month,
        day: REFERENCE_DAY,
    })
}

/// Normalizes any date to the reference date of its month.
pub fn to_reference(date: NaiveDate) -> NaiveDate {
    // Day 12 exists in every month, so only the day component changes.
    date.with_day(REFERENCE_DAY).unwrap_or(date)
}

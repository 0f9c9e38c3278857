//! Calendar-month arithmetic.

use chrono::{Months, NaiveDate};

use crate::error::CalendarError;

/// Adds `months` calendar months to `date`.
///
/// Pure calendar addition: the day of month is kept, and clamped to the last
/// day of the target month when it does not exist there (Jan 31 + 1 month is
/// Feb 28/29). No business-day adjustment is applied.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] if the result is outside chrono's
/// representable range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vintage_calendar::add_months;
///
/// let d = NaiveDate::from_ymd_opt(2023, 7, 7).unwrap();
/// assert_eq!(add_months(d, 2).unwrap().to_string(), "2023-09-07");
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, CalendarError> {
    date.checked_add_months(Months::new(months))
        .ok_or(CalendarError::Overflow { date, months })
}

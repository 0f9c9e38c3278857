//! Quarter membership.

use crate::error::CalendarError;

/// Returns the calendar quarter (1..=4) that contains `month`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
///
/// # Examples
///
/// ```
/// use vintage_calendar::quarter;
///
/// assert_eq!(quarter(3).unwrap(), 1);
/// assert_eq!(quarter(4).unwrap(), 2);
/// assert_eq!(quarter(12).unwrap(), 4);
/// ```
pub fn quarter(month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok((month - 1) / 3 + 1)
}

/// Returns the last month (3, 6, 9 or 12) of quarter `q`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `q` is outside 1..=4; the
/// reported month is the one the quarter would end in.
pub fn quarter_end_month(q: u32) -> Result<u32, CalendarError> {
    if !(1..=4).contains(&q) {
        return Err(CalendarError::InvalidMonth { month: q * 3 });
    }
    Ok(q * 3)
}

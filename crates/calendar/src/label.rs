//! Month names and column labels.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::reference::reference_date;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Looks up a month number (1..=12) from a full or three-letter English
/// month name, ignoring case.
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|full| {
            full.eq_ignore_ascii_case(name)
                || (name.len() == 3 && full[..3].eq_ignore_ascii_case(name))
        })
        .map(|i| i as u32 + 1)
}

/// Parses a `Mon_YY` column label (e.g. `Jan_16`) into a reference date.
///
/// Two-digit years are taken to be in the 2000s.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidLabel`] if the label does not have the
/// `Mon_YY` shape or names an unknown month.
///
/// # Example
///
/// ```
/// use vintage_calendar::parse_month_label;
///
/// assert_eq!(parse_month_label("Mar_21").unwrap().to_string(), "2021-03-12");
/// ```
pub fn parse_month_label(label: &str) -> Result<NaiveDate, CalendarError> {
    let invalid = || CalendarError::InvalidLabel {
        label: label.to_string(),
    };
    let (mon, yy) = label.trim().split_once('_').ok_or_else(invalid)?;
    if mon.len() != 3 || yy.len() != 2 {
        return Err(invalid());
    }
    let month = month_from_name(mon).ok_or_else(invalid)?;
    let yy: i32 = yy.parse().map_err(|_| invalid())?;
    reference_date(2000 + yy, month)
}

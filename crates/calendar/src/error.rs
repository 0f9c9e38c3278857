//! Error types for the vintage-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the vintage-calendar crate.
///
/// This enum covers month and date validation failures, calendar-month
/// arithmetic that leaves chrono's representable range, and month labels that
/// cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a year/month/day triple does not name a real date.
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
        /// Day within the month.
        day: u32,
    },

    /// Returned when adding months leaves the representable date range.
    #[error("date overflow: {date} + {months} month(s)")]
    Overflow {
        /// Starting date.
        date: NaiveDate,
        /// Number of months that were added.
        months: u32,
    },

    /// Returned when a month label (e.g. `Jan_16`) cannot be parsed.
    #[error("invalid month label: {label:?}")]
    InvalidLabel {
        /// The label as it appeared in the input.
        label: String,
    },
}

//! Monthly reference-date sequence generation.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::months::add_months;
use crate::reference::to_reference;

/// Generates `n_months` consecutive monthly reference dates.
///
/// Starting from the reference date of `start`'s month, produces exactly
/// `n_months` dates one calendar month apart. Year boundaries are handled
/// automatically (December rolls to January of the following year).
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] if the sequence runs past chrono's
/// representable range.
///
/// # Example
///
/// ```
/// use vintage_calendar::{month_sequence, reference_date};
///
/// let start = reference_date(2022, 11).unwrap();
/// let dates = month_sequence(start, 3).unwrap();
/// assert_eq!(dates.last().unwrap().to_string(), "2023-01-12");
/// ```
pub fn month_sequence(start: NaiveDate, n_months: usize) -> Result<Vec<NaiveDate>, CalendarError> {
    let start = to_reference(start);
    (0..n_months)
        .map(|i| {
            let offset = u32::try_from(i).map_err(|_| CalendarError::Overflow {
                date: start,
                months: u32::MAX,
            })?;
            add_months(start, offset)
        })
        .collect()
}

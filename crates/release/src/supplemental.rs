//! Built-in release dates for periods the scraper is known to miss.

use chrono::NaiveDate;

use crate::error::ReleaseError;
use crate::fact::PublicationFact;
use crate::publication::Publication;

/// `(publication, reference year, reference month, published y/m/d)`.
///
/// The archived January–March 2016 releases lack a parseable embargo line.
const SUPPLEMENTAL: [(Publication, i32, u32, (i32, u32, u32)); 5] = [
    (Publication::Ces, 2016, 1, (2016, 2, 5)),
    (Publication::Ces, 2016, 2, (2016, 3, 4)),
    (Publication::Sae, 2016, 1, (2016, 3, 14)),
    (Publication::Sae, 2016, 2, (2016, 3, 25)),
    (Publication::Sae, 2016, 3, (2016, 4, 15)),
];

/// Returns the built-in override facts.
///
/// # Errors
///
/// Returns [`ReleaseError::Calendar`] if a table entry is not a valid date.
pub fn supplemental_overrides() -> Result<Vec<PublicationFact>, ReleaseError> {
    SUPPLEMENTAL
        .iter()
        .map(|&(publication, year, month, (py, pm, pd))| {
            let reference = vintage_calendar::reference_date(year, month)?;
            let published = NaiveDate::from_ymd_opt(py, pm, pd).ok_or(
                vintage_calendar::CalendarError::InvalidDate {
                    year: py,
                    month: pm,
                    day: pd,
                },
            )?;
            Ok(PublicationFact::new(publication, reference, published))
        })
        .collect()
}

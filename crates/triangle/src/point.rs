//! Single revision values.

use chrono::NaiveDate;

/// One revision of one reference period's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevisionPoint {
    /// Reference period (day 12 of the reference month).
    pub reference_date: NaiveDate,
    /// Revision index; 0 is the initial estimate.
    pub revision_index: u8,
    /// Estimate.
    pub value: f64,
}

impl RevisionPoint {
    /// Creates a point.
    pub fn new(reference_date: NaiveDate, revision_index: u8, value: f64) -> Self {
        Self {
            reference_date,
            revision_index,
            value,
        }
    }
}

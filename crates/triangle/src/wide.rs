//! Wide revision tables: one row per reference period, one column per
//! revision.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::TriangleError;
use crate::point::RevisionPoint;

/// One reference period of a wide revision table.
///
/// `values[k]` is revision `k` (initial, first revised, ...), `None` where the
/// source holds a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    /// Reference period.
    pub reference_date: NaiveDate,
    /// Revision values in index order.
    pub values: Vec<Option<f64>>,
}

impl WideRow {
    /// Creates a row.
    pub fn new(reference_date: NaiveDate, values: Vec<Option<f64>>) -> Self {
        Self {
            reference_date,
            values,
        }
    }
}

/// Unpivots wide rows into revision points, dividing every value by `scale`.
///
/// Absent values are skipped. Output is ordered by reference date then
/// revision index.
///
/// # Errors
///
/// Returns [`TriangleError::InvalidScale`] if `scale` is not finite and
/// positive, [`TriangleError::TooManyRevisions`] if a row has more than 256
/// revision columns, or [`TriangleError::DuplicateReference`] if two rows
/// share a reference date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vintage_triangle::{WideRow, unpivot};
///
/// let jan = NaiveDate::from_ymd_opt(2023, 1, 12).unwrap();
/// let rows = [WideRow::new(jan, vec![Some(150_000.0), Some(150_500.0), None])];
/// let points = unpivot(&rows, 1000.0).unwrap();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[1].value, 150.5);
/// ```
pub fn unpivot(rows: &[WideRow], scale: f64) -> Result<Vec<RevisionPoint>, TriangleError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TriangleError::InvalidScale { scale });
    }

    let mut seen = BTreeSet::new();
    let mut points = Vec::new();
    for row in rows {
        if !seen.insert(row.reference_date) {
            return Err(TriangleError::DuplicateReference {
                reference_date: row.reference_date,
            });
        }
        if row.values.len() > usize::from(u8::MAX) + 1 {
            return Err(TriangleError::TooManyRevisions {
                count: row.values.len(),
            });
        }
        for (k, value) in row.values.iter().enumerate() {
            if let Some(v) = value {
                // Bounded by the length check above.
                let revision_index = k as u8;
                points.push(RevisionPoint::new(row.reference_date, revision_index, v / scale));
            }
        }
    }

    points.sort_by_key(|p| (p.reference_date, p.revision_index));
    debug!(
        n_rows = rows.len(),
        n_points = points.len(),
        "unpivoted wide revision table"
    );
    Ok(points)
}

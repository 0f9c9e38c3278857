//! Error types for the vintage-triangle crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the vintage-triangle crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangleError {
    /// Returned when a matrix row has the wrong number of cells.
    #[error("ragged matrix: row {row} has {got} cells, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Number of reference columns.
        expected: usize,
        /// Number of cells in the row.
        got: usize,
    },

    /// Returned when the number of row labels differs from the number of rows.
    #[error("matrix has {rows} rows but {releases} release labels")]
    ReleaseCount {
        /// Number of cell rows.
        rows: usize,
        /// Number of release labels.
        releases: usize,
    },

    /// Returned when column or row labels are not strictly ascending.
    #[error("{axis} labels not strictly ascending at index {index}: {previous} then {current}")]
    NotChronological {
        /// `"column"` or `"release"`.
        axis: &'static str,
        /// Index of the offending label.
        index: usize,
        /// Label before it.
        previous: NaiveDate,
        /// The offending label.
        current: NaiveDate,
    },

    /// Returned when the first release row does not first publish the first
    /// reference column, so diagonals would pair the wrong cells.
    #[error("first release {release} does not match first reference column {column}")]
    Misaligned {
        /// Label of row 0.
        release: NaiveDate,
        /// Label of column 0.
        column: NaiveDate,
    },

    /// Returned when a cell is neither a number nor a recognized sentinel.
    #[error("invalid cell value: {value:?}")]
    InvalidCell {
        /// The raw cell text.
        value: String,
    },

    /// Returned when a wide table repeats a reference period.
    #[error("duplicate reference period {reference_date} in wide revision table")]
    DuplicateReference {
        /// The repeated reference date.
        reference_date: NaiveDate,
    },

    /// Returned when a wide row has more revision columns than fit in a `u8`.
    #[error("too many revision columns: {count} (max 256)")]
    TooManyRevisions {
        /// Number of revision columns.
        count: usize,
    },

    /// Returned when the value scale is zero, negative, or not finite.
    #[error("invalid scale: {scale} (must be finite and > 0)")]
    InvalidScale {
        /// The rejected scale.
        scale: f64,
    },
}

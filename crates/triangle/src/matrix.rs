//! Revision triangles and their diagonals.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::TriangleError;
use crate::point::RevisionPoint;

/// A revision triangle: one row per release, one column per reference period.
///
/// Cell `(r, c)` is the estimate for reference column `c` as published in
/// release `r`. Row `j` is the release that first publishes column `j`, so
/// revision `k` of column `j` sits at `(j + k, j)`; cells above that
/// diagonal are absent.
///
/// Cells are stored row-major in one flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularMatrix {
    releases: Vec<NaiveDate>,
    columns: Vec<NaiveDate>,
    cells: Vec<Option<f64>>,
}

impl TriangularMatrix {
    /// Builds a matrix from release labels, reference-column labels, and
    /// rows of cells.
    ///
    /// # Errors
    ///
    /// Returns [`TriangleError::ReleaseCount`] if `rows` and `releases`
    /// differ in length, [`TriangleError::Ragged`] if a row's length differs
    /// from `columns`, or [`TriangleError::NotChronological`] if either label
    /// axis is not strictly ascending.
    pub fn from_rows(
        releases: Vec<NaiveDate>,
        columns: Vec<NaiveDate>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, TriangleError> {
        if rows.len() != releases.len() {
            return Err(TriangleError::ReleaseCount {
                rows: rows.len(),
                releases: releases.len(),
            });
        }
        check_ascending("release", &releases)?;
        check_ascending("column", &columns)?;

        let n_cols = columns.len();
        let mut cells = Vec::with_capacity(rows.len() * n_cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_cols {
                return Err(TriangleError::Ragged {
                    row,
                    expected: n_cols,
                    got: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            releases,
            columns,
            cells,
        })
    }

    /// Number of release rows.
    pub fn n_releases(&self) -> usize {
        self.releases.len()
    }

    /// Number of reference columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Release labels.
    pub fn releases(&self) -> &[NaiveDate] {
        &self.releases
    }

    /// Reference-column labels.
    pub fn columns(&self) -> &[NaiveDate] {
        &self.columns
    }

    /// Cell at `(row, col)`, or `None` if out of range or absent.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.n_releases() || col >= self.n_columns() {
            return None;
        }
        self.cells[row * self.n_columns() + col]
    }

    /// Drops releases and reference columns dated before `start`.
    ///
    /// Trimming both axes with the same cutoff keeps row `j` aligned with
    /// column `j` when the untrimmed matrix shares one monthly calendar on
    /// both axes.
    pub fn starting_at(&self, start: NaiveDate) -> Self {
        let first_row = self.releases.partition_point(|d| *d < start);
        let first_col = self.columns.partition_point(|d| *d < start);
        let n_cols = self.n_columns();

        let n_rows = self.n_releases() - first_row;
        let mut cells = Vec::with_capacity(n_rows * (n_cols - first_col));
        for row in first_row..self.n_releases() {
            let offset = row * n_cols;
            cells.extend_from_slice(&self.cells[offset + first_col..offset + n_cols]);
        }

        debug!(
            start = %start,
            dropped_releases = first_row,
            dropped_columns = first_col,
            "trimmed revision triangle"
        );
        Self {
            releases: self.releases[first_row..].to_vec(),
            columns: self.columns[first_col..].to_vec(),
            cells,
        }
    }

    /// Extracts the revision-`k` diagonal: cell `(j + k, j)` for every column
    /// `j` whose row exists, skipping absent cells.
    ///
    /// Larger `k` reaches past the last release for the newest columns, so
    /// the output shrinks as `k` grows. Output is ordered by reference date.
    ///
    /// # Errors
    ///
    /// Returns [`TriangleError::Misaligned`] if the first release is not the
    /// one that first publishes the first column.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use vintage_triangle::TriangularMatrix;
    ///
    /// let jan = NaiveDate::from_ymd_opt(2016, 1, 12).unwrap();
    /// let feb = NaiveDate::from_ymd_opt(2016, 2, 12).unwrap();
    /// let m = TriangularMatrix::from_rows(
    ///     vec![jan, feb],
    ///     vec![jan, feb],
    ///     vec![vec![Some(100.0), None], vec![Some(101.0), Some(200.0)]],
    /// )
    /// .unwrap();
    ///
    /// let first: Vec<f64> = m.extract(0).unwrap().iter().map(|p| p.value).collect();
    /// assert_eq!(first, vec![100.0, 200.0]);
    /// let second: Vec<f64> = m.extract(1).unwrap().iter().map(|p| p.value).collect();
    /// assert_eq!(second, vec![101.0]);
    /// ```
    pub fn extract(&self, k: u8) -> Result<Vec<RevisionPoint>, TriangleError> {
        self.check_aligned()?;
        let offset = usize::from(k);
        let n = self
            .n_columns()
            .min(self.n_releases().saturating_sub(offset));

        Ok((0..n)
            .filter_map(|j| {
                self.get(j + offset, j)
                    .map(|value| RevisionPoint::new(self.columns[j], k, value))
            })
            .collect())
    }

    /// Extracts diagonals `0..=max_revision` and merges them, ordered by
    /// reference date then revision index.
    ///
    /// # Errors
    ///
    /// Same as [`TriangularMatrix::extract`].
    pub fn extract_revisions(&self, max_revision: u8) -> Result<Vec<RevisionPoint>, TriangleError> {
        let mut points = Vec::new();
        for k in 0..=max_revision {
            points.extend(self.extract(k)?);
        }
        points.sort_by_key(|p| (p.reference_date, p.revision_index));
        debug!(
            n_points = points.len(),
            max_revision, "extracted revision diagonals"
        );
        Ok(points)
    }

    fn check_aligned(&self) -> Result<(), TriangleError> {
        match (self.releases.first(), self.columns.first()) {
            (Some(&release), Some(&column)) if release != column => {
                Err(TriangleError::Misaligned { release, column })
            }
            _ => Ok(()),
        }
    }
}

fn check_ascending(axis: &'static str, labels: &[NaiveDate]) -> Result<(), TriangleError> {
    for (i, pair) in labels.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(TriangleError::NotChronological {
                axis,
                index: i + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

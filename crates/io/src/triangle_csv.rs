//! Triangular revision tables in CSV form.
//!
//! Layout: `year`, `month` identify the release row; every further column
//! whose header is a `Mon_YY` label is a reference period. Other columns are
//! ignored.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};
use vintage_calendar::{parse_month_label, reference_date};
use vintage_triangle::{TriangularMatrix, parse_cell};

use crate::error::IoError;

/// Reads a revision triangle from CSV.
///
/// Cells accept numbers, blanks and the missing-value sentinels of
/// [`vintage_triangle::SENTINELS`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is missing,
/// [`IoError::MissingColumn`] without `year`/`month` headers,
/// [`IoError::InvalidRecord`] for unparsable release labels or cells, and
/// [`IoError::Triangle`] if the labels are not chronological.
pub fn read_triangle_csv(path: &Path) -> Result<TriangularMatrix, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let year_idx = position("year")?;
    let month_idx = position("month")?;

    let mut value_idx = Vec::new();
    let mut columns: Vec<NaiveDate> = Vec::new();
    let mut skipped = 0usize;
    for (idx, header) in headers.iter().enumerate() {
        if idx == year_idx || idx == month_idx {
            continue;
        }
        match parse_month_label(header) {
            Ok(date) => {
                value_idx.push(idx);
                columns.push(date);
            }
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "ignored non-date columns");
    }

    let mut releases = Vec::new();
    let mut rows = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let line = line_num as u64 + 2;
        let invalid = |reason: String| IoError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let year: i32 = field(year_idx)
            .parse()
            .map_err(|_| invalid(format!("invalid year {:?}", field(year_idx))))?;
        let month: u32 = field(month_idx)
            .parse()
            .map_err(|_| invalid(format!("invalid month {:?}", field(month_idx))))?;
        releases.push(reference_date(year, month).map_err(|e| invalid(e.to_string()))?);

        let values = value_idx
            .iter()
            .map(|&idx| parse_cell(field(idx)).map_err(|e| invalid(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(values);
    }

    debug!(
        path = %path.display(),
        n_releases = releases.len(),
        n_columns = columns.len(),
        "read revision triangle"
    );
    Ok(TriangularMatrix::from_rows(releases, columns, rows)?)
}

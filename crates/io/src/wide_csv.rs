//! Wide quarterly revision tables in CSV form.
//!
//! One row per area and month with columns `Year`, `Quarter`, `Area`,
//! `Field` (e.g. `January Employment`) and the revision columns named in
//! [`REVISION_COLUMNS`]. Only employment fields are read.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};
use vintage_calendar::{month_from_name, reference_date};
use vintage_triangle::{WideRow, parse_cell};

use crate::error::IoError;

/// Revision columns in index order. Trailing columns may be absent.
pub const REVISION_COLUMNS: [&str; 5] = [
    "Initial Value",
    "First Revised Value",
    "Second Revised Value",
    "Third Revised Value",
    "Fourth Revised Value",
];

const FIELD_SUFFIX: &str = "Employment";

/// Reads a wide revision table, grouping rows by FIPS code.
///
/// `area_codes` maps area names to FIPS codes; rows for other areas are
/// skipped. Cell values are returned unscaled.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is missing,
/// [`IoError::MissingColumn`] if `Year`, `Area`, `Field` or `Initial Value`
/// is absent, and [`IoError::InvalidRecord`] for unparsable years, month
/// names or cells.
pub fn read_wide_revisions(
    path: &Path,
    area_codes: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Vec<WideRow>>, IoError> {
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
    let find = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        find(name).ok_or_else(|| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    };
    let year_idx = require("Year")?;
    let area_idx = require("Area")?;
    let field_idx = require("Field")?;
    require(REVISION_COLUMNS[0])?;
    let revision_idx: Vec<usize> = REVISION_COLUMNS.iter().map_while(|&c| find(c)).collect();

    let mut by_area: BTreeMap<String, Vec<WideRow>> = BTreeMap::new();
    let mut skipped_areas = 0usize;
    for (line_num, result) in reader.records().enumerate() {
        let line = line_num as u64 + 2;
        let invalid = |reason: String| IoError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let Some(month_name) = field(field_idx).strip_suffix(FIELD_SUFFIX) else {
            continue;
        };
        let Some(code) = area_codes.get(field(area_idx)) else {
            skipped_areas += 1;
            continue;
        };

        let year: i32 = field(year_idx)
            .parse()
            .map_err(|_| invalid(format!("invalid year {:?}", field(year_idx))))?;
        let month = month_from_name(month_name)
            .ok_or_else(|| invalid(format!("unknown month in field {:?}", field(field_idx))))?;
        let date = reference_date(year, month).map_err(|e| invalid(e.to_string()))?;
        let values = revision_idx
            .iter()
            .map(|&idx| parse_cell(field(idx)).map_err(|e| invalid(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        by_area
            .entry(code.clone())
            .or_default()
            .push(WideRow::new(date, values));
    }

    if skipped_areas > 0 {
        debug!(path = %path.display(), skipped_areas, "skipped rows for unmapped areas");
    }
    info!(path = %path.display(), n_areas = by_area.len(), "read wide revision table");
    Ok(by_area)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;

    use super::*;

    const HEADER: &str = "Year,Quarter,Area,Field,Initial Value,First Revised Value,\
                          Second Revised Value,Third Revised Value,Fourth Revised Value\n";

    fn write(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("qcew.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(format!("{HEADER}{body}").as_bytes())
            .unwrap();
        path
    }

    fn codes() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("United States".to_string(), "00".to_string()),
            ("Ohio".to_string(), "39".to_string()),
        ])
    }

    #[test]
    fn groups_by_area_and_filters_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "2023,1,Ohio,January Employment,5000,5010,5020,5030,Not yet published\n\
             2023,1,Ohio,Total Wages,1,2,3,4,5\n\
             2023,1,United States,March Employment,150000,150100,Not applicable,,\n\
             2023,1,Puerto Rico,January Employment,900,901,902,903,904\n",
        );
        let by_area = read_wide_revisions(&path, &codes()).unwrap();
        assert_eq!(by_area.len(), 2);

        let ohio = &by_area["39"];
        assert_eq!(ohio.len(), 1);
        assert_eq!(
            ohio[0].reference_date,
            NaiveDate::from_ymd_opt(2023, 1, 12).unwrap()
        );
        assert_eq!(
            ohio[0].values,
            vec![Some(5000.0), Some(5010.0), Some(5020.0), Some(5030.0), None]
        );

        let us = &by_area["00"];
        assert_eq!(us[0].reference_date.to_string(), "2023-03-12");
        assert_eq!(us[0].values[1], Some(150_100.0));
        assert_eq!(us[0].values[2], None);
    }

    #[test]
    fn bad_month_in_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "2023,1,Ohio,Smarch Employment,1,2,3,4,5\n");
        match read_wide_revisions(&path, &codes()).unwrap_err() {
            IoError::InvalidRecord { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("Smarch"));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn initial_value_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.csv");
        std::fs::write(&path, "Year,Quarter,Area,Field\n2023,1,Ohio,January Employment\n")
            .unwrap();
        assert!(matches!(
            read_wide_revisions(&path, &codes()),
            Err(IoError::MissingColumn { ref name, .. }) if name == "Initial Value"
        ));
    }

    #[test]
    fn trailing_revision_columns_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.csv");
        std::fs::write(
            &path,
            "Year,Quarter,Area,Field,Initial Value,First Revised Value\n\
             2022,4,Ohio,December Employment,5100,5105\n",
        )
        .unwrap();
        let by_area = read_wide_revisions(&path, &codes()).unwrap();
        assert_eq!(by_area["39"][0].values, vec![Some(5100.0), Some(5105.0)]);
    }
}

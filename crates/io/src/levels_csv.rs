//! Initial and latest levels per series, in CSV form.
//!
//! One row per series and reference month holding the first published
//! estimate and the most recent one. Columns:
//!
//! | Column                | Notes                                          |
//! |-----------------------|------------------------------------------------|
//! | `ref_date`            | `YYYY-MM-DD`, any day of the reference month   |
//! | `seasonally_adjusted` | `true` / `false` (alias `adjusted`)            |
//! | `geographic_type`     | optional, defaults to `state`                  |
//! | `geographic_code`     | FIPS code; one-digit codes are zero-padded     |
//! | `industry_type`       |                                                |
//! | `industry_code`       |                                                |
//! | `initial`             | revision 0 (alias `employment_initial`)        |
//! | `latest`              | revision 1 (alias `employment_latest`)         |
//!
//! Value cells accept the same sentinels as revision triangles.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use vintage_calendar::to_reference;
use vintage_panel::{GeographicType, SeriesKey};
use vintage_release::Publication;
use vintage_triangle::{WideRow, parse_cell};

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct LevelRecord {
    ref_date: NaiveDate,
    #[serde(alias = "adjusted")]
    seasonally_adjusted: bool,
    #[serde(default)]
    geographic_type: Option<String>,
    geographic_code: String,
    industry_type: String,
    industry_code: String,
    #[serde(alias = "employment_initial")]
    initial: String,
    #[serde(alias = "employment_latest")]
    latest: String,
}

/// Reads an initial/latest levels table, grouping rows by series.
///
/// Each row becomes a two-column [`WideRow`]: the initial level as
/// revision 0 and the latest level as revision 1. Values are returned
/// unscaled. Every series is attributed to `publication`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is missing and
/// [`IoError::InvalidRecord`] for rows with a missing column, an unparsable
/// date or flag, an unknown geographic type, an empty geographic code or an
/// invalid value cell.
pub fn read_revision_levels(
    path: &Path,
    publication: Publication,
) -> Result<BTreeMap<SeriesKey, Vec<WideRow>>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut by_series: BTreeMap<SeriesKey, Vec<WideRow>> = BTreeMap::new();
    for (line_num, result) in reader.deserialize::<LevelRecord>().enumerate() {
        let line = line_num as u64 + 2;
        let invalid = |reason: String| IoError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let record = result.map_err(|e| invalid(e.to_string()))?;

        let level = match record.geographic_type.as_deref() {
            None | Some("") => GeographicType::State,
            Some(name) => name
                .parse()
                .map_err(|e: vintage_panel::PanelError| invalid(e.to_string()))?,
        };
        if record.geographic_code.is_empty() {
            return Err(invalid("empty geographic_code".to_string()));
        }
        let code = match level {
            GeographicType::State => format!("{:0>2}", record.geographic_code),
            _ => record.geographic_code,
        };

        let initial = parse_cell(&record.initial).map_err(|e| invalid(e.to_string()))?;
        let latest = parse_cell(&record.latest).map_err(|e| invalid(e.to_string()))?;

        let key = SeriesKey::national(publication, record.seasonally_adjusted)
            .with_geography(level, code)
            .with_industry(record.industry_type, record.industry_code);
        by_series
            .entry(key)
            .or_default()
            .push(WideRow::new(to_reference(record.ref_date), vec![initial, latest]));
    }

    info!(
        path = %path.display(),
        n_series = by_series.len(),
        "read revision levels"
    );
    Ok(by_series)
}

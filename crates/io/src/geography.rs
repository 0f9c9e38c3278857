//! Geography lookup CSV.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use vintage_panel::GeographyMap;

use crate::error::IoError;

/// Area name of the national aggregate in wide revision tables.
pub const NATIONAL_AREA: &str = "United States";

/// FIPS code of the national aggregate.
pub const NATIONAL_CODE: &str = "00";

#[derive(Debug, Deserialize)]
struct GeographyRecord {
    state_fips: String,
    region: String,
    division: String,
    #[serde(default)]
    state_name: Option<String>,
}

/// State-to-aggregate lookup plus the area names used to identify states
/// in wide revision tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeographyTable {
    /// State FIPS to region and division.
    pub map: GeographyMap,
    /// Area name to FIPS code, always including [`NATIONAL_AREA`].
    pub area_codes: BTreeMap<String, String>,
}

/// Reads the geography lookup with columns `state_fips`, `region`,
/// `division` and optionally `state_name`.
///
/// FIPS codes shorter than two digits are zero-padded. A blank `region` or
/// `division` cell leaves the state unmapped at that level. Extra columns
/// are ignored.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is missing and
/// [`IoError::InvalidRecord`] for rows missing a required column or with an
/// empty FIPS code.
pub fn read_geography(path: &Path) -> Result<GeographyTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut table = GeographyTable::default();
    table
        .area_codes
        .insert(NATIONAL_AREA.to_string(), NATIONAL_CODE.to_string());

    for (line_num, result) in reader.deserialize::<GeographyRecord>().enumerate() {
        let line = line_num as u64 + 2;
        let record = result.map_err(|e| IoError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason: e.to_string(),
        })?;
        if record.state_fips.is_empty() {
            return Err(IoError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                reason: "empty state_fips".to_string(),
            });
        }
        let fips = format!("{:0>2}", record.state_fips);
        if let Some(name) = record.state_name.filter(|n| !n.is_empty()) {
            table.area_codes.insert(name, fips.clone());
        }
        table.map.insert(fips, record.region, record.division);
    }

    info!(path = %path.display(), n_states = table.map.len(), "read geography lookup");
    Ok(table)
}

//! Summing state rows into regions and divisions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::assemble::check_unique;
use crate::error::PanelError;
use crate::geography::{GeographicType, GeographyMap};
use crate::row::{PanelRow, SeriesKey};

/// Aggregate levels built from state rows, in output order.
const AGGREGATE_LEVELS: [GeographicType; 2] = [GeographicType::Region, GeographicType::Division];

/// State codes left out of an aggregate level for lack of a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// Per aggregate level, the number of state rows skipped per state code.
    pub unmapped: BTreeMap<GeographicType, BTreeMap<String, usize>>,
}

impl AggregationReport {
    /// Whether every state row was mapped at every level.
    pub fn is_empty(&self) -> bool {
        self.unmapped.values().all(BTreeMap::is_empty)
    }

    /// Total number of skipped state rows across levels.
    pub fn total_unmapped(&self) -> usize {
        self.unmapped.values().flat_map(BTreeMap::values).sum()
    }
}

type GroupKey = (SeriesKey, NaiveDate, Option<NaiveDate>, u8, Option<u8>);

/// Adds region and division rows summed from state rows.
///
/// State rows are grouped on every key column except geography, so each
/// aggregate row sums the states that share a series, reference period and
/// vintage. Input rows are all kept. National rows are never summed.
///
/// The combined panel is checked for duplicate keys and sorted.
///
/// # Errors
///
/// Returns [`PanelError::DuplicateKey`] if the combined panel repeats a key,
/// e.g. when the input already held region rows with the same key.
#[tracing::instrument(skip_all, fields(n_rows = rows.len(), n_states = geography.len()))]
pub fn aggregate(
    mut rows: Vec<PanelRow>,
    geography: &GeographyMap,
) -> Result<(Vec<PanelRow>, AggregationReport), PanelError> {
    let mut report = AggregationReport::default();
    let mut aggregated = Vec::new();

    for level in AGGREGATE_LEVELS {
        let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();
        let mut unmapped: BTreeMap<String, usize> = BTreeMap::new();

        for row in rows
            .iter()
            .filter(|r| r.series.geographic_type == GeographicType::State)
        {
            let Some(code) = geography.parent(&row.series.geographic_code, level) else {
                *unmapped.entry(row.series.geographic_code.clone()).or_default() += 1;
                continue;
            };
            let series = row.series.clone().with_geography(level, code);
            let key = (
                series,
                row.reference_date,
                row.effective_date,
                row.revision_index,
                row.benchmark_rank,
            );
            *groups.entry(key).or_default() += row.value;
        }

        for (code, count) in &unmapped {
            warn!(
                level = %level,
                state = %code,
                n_rows = count,
                "state has no mapping; excluded from aggregate"
            );
        }

        let n_groups = groups.len();
        aggregated.extend(groups.into_iter().map(
            |((series, reference_date, effective_date, revision_index, benchmark_rank), value)| {
                PanelRow {
                    series,
                    reference_date,
                    effective_date,
                    revision_index,
                    benchmark_rank,
                    value,
                }
            },
        ));
        info!(level = %level, n_rows = n_groups, "aggregated state rows");
        report.unmapped.insert(level, unmapped);
    }

    rows.extend(aggregated);
    check_unique(&rows)?;
    rows.sort_by(|a, b| a.key().cmp(&b.key()));
    Ok((rows, report))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use vintage_release::Publication;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_row(fips: &str, value: f64) -> PanelRow {
        PanelRow {
            series: SeriesKey::national(Publication::Sae, false)
                .with_geography(GeographicType::State, fips),
            reference_date: ymd(2022, 5, 12),
            effective_date: Some(ymd(2022, 6, 17)),
            revision_index: 0,
            benchmark_rank: Some(0),
            value,
        }
    }

    fn map() -> GeographyMap {
        GeographyMap::new()
            .with_state("01", "3", "06")
            .with_state("13", "3", "05")
            .with_state("06", "4", "09")
    }

    fn values_at(rows: &[PanelRow], level: GeographicType) -> Vec<(String, f64)> {
        rows.iter()
            .filter(|r| r.series.geographic_type == level)
            .map(|r| (r.series.geographic_code.clone(), r.value))
            .collect()
    }

    #[test]
    fn sums_states_by_level() {
        let rows = vec![
            state_row("01", 2000.0),
            state_row("13", 4500.5),
            state_row("06", 17000.0),
        ];
        let (out, report) = aggregate(rows, &map()).unwrap();

        let regions = values_at(&out, GeographicType::Region);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].0, "3");
        assert_relative_eq!(regions[0].1, 6500.5);
        assert_eq!(regions[1].0, "4");
        assert_relative_eq!(regions[1].1, 17000.0);

        let divisions = values_at(&out, GeographicType::Division);
        let codes: Vec<&str> = divisions.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["05", "06", "09"]);

        assert_eq!(values_at(&out, GeographicType::State).len(), 3);
        assert!(report.is_empty());
    }

    #[test]
    fn unmapped_states_reported() {
        let rows = vec![state_row("01", 1.0), state_row("72", 2.0)];
        let (out, report) = aggregate(rows, &map()).unwrap();

        assert_relative_eq!(values_at(&out, GeographicType::Region)[0].1, 1.0);
        assert_eq!(report.unmapped[&GeographicType::Region]["72"], 1);
        assert_eq!(report.unmapped[&GeographicType::Division]["72"], 1);
        assert_eq!(report.total_unmapped(), 2);
    }

    #[test]
    fn blank_lookup_codes_excluded_and_reported() {
        let geography = map().with_state("72", "", "");
        let rows = vec![state_row("01", 1.0), state_row("72", 2.0)];
        let (out, report) = aggregate(rows, &geography).unwrap();

        let regions = values_at(&out, GeographicType::Region);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].0, "3");
        assert_relative_eq!(regions[0].1, 1.0);
        assert!(out.iter().all(|r| !r.series.geographic_code.is_empty()));
        assert_eq!(report.unmapped[&GeographicType::Region]["72"], 1);
        assert_eq!(report.unmapped[&GeographicType::Division]["72"], 1);
    }

    #[test]
    fn national_rows_pass_through() {
        let mut national = state_row("00", 150_000.0);
        national.series = SeriesKey::national(Publication::Ces, false);
        let (out, report) = aggregate(vec![national.clone()], &map()).unwrap();
        assert_eq!(out, vec![national]);
        assert!(report.is_empty());
    }

    #[test]
    fn vintages_aggregate_separately() {
        let mut later = state_row("01", 10.0);
        later.revision_index = 1;
        later.effective_date = Some(ymd(2022, 7, 15));
        let rows = vec![state_row("01", 1.0), state_row("13", 2.0), later];
        let (out, _) = aggregate(rows, &map()).unwrap();
        let region: Vec<f64> = out
            .iter()
            .filter(|r| r.series.geographic_type == GeographicType::Region)
            .map(|r| r.value)
            .collect();
        assert_eq!(region.len(), 2);
        assert_relative_eq!(region[0], 3.0);
        assert_relative_eq!(region[1], 10.0);
    }

    #[test]
    fn existing_aggregate_collides() {
        let mut region = state_row("3", 3.0);
        region.series.geographic_type = GeographicType::Region;
        let rows = vec![state_row("01", 1.0), state_row("13", 2.0), region];
        assert!(matches!(
            aggregate(rows, &map()),
            Err(PanelError::DuplicateKey { .. })
        ));
    }
}

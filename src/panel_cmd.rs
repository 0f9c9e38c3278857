//! Panel command: extract revisions, join vintage dates, aggregate, write.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use vintage_io::{
    GeographyTable, NATIONAL_AREA, NATIONAL_CODE, read_geography, read_revision_levels,
    read_triangle_csv, read_wide_revisions, write_panel,
};
use vintage_panel::{GeographicType, Panel, SeriesKey, SeriesValues, build_panel};
use vintage_release::Publication;
use vintage_triangle::unpivot;

use crate::cli::PanelArgs;
use crate::config::{LevelsToml, QcewToml, TriangleToml, VintageConfig};
use crate::convert;
use crate::grid_cmd;

/// JSON run summary written by `--report`.
#[derive(Debug, Serialize)]
struct RunReport {
    as_of: String,
    n_facts: usize,
    n_events: usize,
    n_series: usize,
    n_rows: usize,
    rows_by_geography: BTreeMap<String, usize>,
    unmapped: BTreeMap<String, BTreeMap<String, usize>>,
}

impl RunReport {
    fn new(as_of: String, n_facts: usize, n_events: usize, n_series: usize, panel: &Panel) -> Self {
        Self {
            as_of,
            n_facts,
            n_events,
            n_series,
            n_rows: panel.rows.len(),
            rows_by_geography: panel
                .rows_by_geography()
                .into_iter()
                .map(|(level, n)| (level.to_string(), n))
                .collect(),
            unmapped: panel
                .report
                .unmapped
                .iter()
                .map(|(level, codes)| (level.to_string(), codes.clone()))
                .collect(),
        }
    }
}

/// Reads one triangle and extracts its revision diagonals.
fn triangle_series(triangle: &TriangleToml) -> Result<SeriesValues> {
    let path = &triangle.path;
    let publication: Publication = triangle
        .publication
        .parse()
        .with_context(|| format!("triangle {}", path.display()))?;

    let mut matrix = read_triangle_csv(path)
        .with_context(|| format!("failed to read triangle: {}", path.display()))?;
    if let Some(start) = triangle.start {
        matrix = matrix.starting_at(vintage_calendar::to_reference(start));
    }
    let points = matrix
        .extract_revisions(triangle.max_revision)
        .with_context(|| format!("failed to extract revisions: {}", path.display()))?;

    let key = SeriesKey::national(publication, triangle.seasonally_adjusted)
        .with_industry(&triangle.industry_type, &triangle.industry_code);
    info!(series = %key, n_points = points.len(), "extracted triangle diagonals");
    Ok(SeriesValues::new(key, points))
}

/// Reads the wide quarterly table into one series per area.
fn qcew_series(qcew: &QcewToml, geography: Option<&GeographyTable>) -> Result<Vec<SeriesValues>> {
    let area_codes = match geography {
        Some(table) => table.area_codes.clone(),
        None => BTreeMap::from([(NATIONAL_AREA.to_string(), NATIONAL_CODE.to_string())]),
    };
    let by_area = read_wide_revisions(&qcew.path, &area_codes)
        .with_context(|| format!("failed to read wide revisions: {}", qcew.path.display()))?;

    by_area
        .into_iter()
        .map(|(code, rows)| -> Result<SeriesValues> {
            let level = if code == NATIONAL_CODE {
                GeographicType::National
            } else {
                GeographicType::State
            };
            let points = unpivot(&rows, qcew.scale)
                .with_context(|| format!("failed to unpivot area {code}"))?;
            let key = SeriesKey::national(Publication::Qcew, false).with_geography(level, code);
            Ok(SeriesValues::new(key, points))
        })
        .collect()
}

/// Reads an initial/latest levels table into revisions 0 and 1 per series.
fn levels_series(levels: &LevelsToml) -> Result<Vec<SeriesValues>> {
    let path = &levels.path;
    let publication: Publication = levels
        .publication
        .parse()
        .with_context(|| format!("levels {}", path.display()))?;
    let by_series = read_revision_levels(path, publication)
        .with_context(|| format!("failed to read revision levels: {}", path.display()))?;

    by_series
        .into_iter()
        .map(|(key, rows)| -> Result<SeriesValues> {
            let points = unpivot(&rows, levels.scale)
                .with_context(|| format!("failed to unpivot series {key}"))?;
            Ok(SeriesValues::new(key, points))
        })
        .collect()
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write run report: {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}

/// Run the panel pipeline.
pub fn run(args: PanelArgs) -> Result<()> {
    let _cmd = info_span!("panel").entered();
    let config = VintageConfig::load(&args.config)?;
    let as_of = convert::resolve_as_of(args.as_of, config.as_of);
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let options = convert::build_assemble_options(&config.panel);

    if config.triangle.is_empty() && config.qcew.is_none() && config.levels.is_empty() {
        bail!("no revision inputs: configure at least one [[triangle]], [qcew] or [[levels]]");
    }

    info!(%as_of, "regenerating revision events");
    let (n_facts, events) = grid_cmd::build_events(&config, as_of)?;

    let geography = match config.io.geography {
        Some(ref path) => Some(
            read_geography(path)
                .with_context(|| format!("failed to read geography: {}", path.display()))?,
        ),
        None => None,
    };
    let geography_map = convert::apply_geography_overrides(
        geography.as_ref().map(|g| g.map.clone()),
        &config.panel.geography_overrides,
    );

    let mut series = config
        .triangle
        .iter()
        .map(triangle_series)
        .collect::<Result<Vec<_>>>()?;
    if let Some(ref qcew) = config.qcew {
        series.extend(qcew_series(qcew, geography.as_ref())?);
    }
    for levels in &config.levels {
        series.extend(levels_series(levels)?);
    }

    let panel = build_panel(&series, &events, geography_map.as_ref(), &options)
        .context("failed to assemble revision panel")?;

    let output = args.output.unwrap_or_else(|| config.io.panel.clone());
    write_panel(&output, &panel.rows, &writer_cfg)
        .with_context(|| format!("failed to write panel: {}", output.display()))?;
    info!(n_rows = panel.rows.len(), path = %output.display(), "revision panel written");

    if let Some(ref path) = args.report {
        let report = RunReport::new(as_of.to_string(), n_facts, events.len(), series.len(), &panel);
        write_report(path, &report)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_levels_by_name() {
        let panel = Panel {
            rows: Vec::new(),
            report: vintage_panel::AggregationReport {
                unmapped: BTreeMap::from([(
                    GeographicType::Region,
                    BTreeMap::from([("72".to_string(), 3)]),
                )]),
            },
        };
        let report = RunReport::new("2024-06-30".to_string(), 10, 20, 2, &panel);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["n_events"], 20);
        assert_eq!(json["unmapped"]["region"]["72"], 3);
        assert!(json["rows_by_geography"].as_object().unwrap().is_empty());
    }
}

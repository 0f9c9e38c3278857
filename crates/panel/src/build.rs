//! End-to-end panel construction.

use std::collections::BTreeMap;

use tracing::info;
use vintage_grid::RevisionEvent;

use crate::aggregate::{AggregationReport, aggregate};
use crate::assemble::{AssembleOptions, assemble};
use crate::error::PanelError;
use crate::geography::{GeographicType, GeographyMap};
use crate::row::{PanelRow, SeriesValues};

/// A finished revision panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Rows sorted by [`PanelRow::key`], unique per key.
    pub rows: Vec<PanelRow>,
    /// States missing from the geography lookup, if one was supplied.
    pub report: AggregationReport,
}

impl Panel {
    /// Number of rows per geographic level.
    pub fn rows_by_geography(&self) -> BTreeMap<GeographicType, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.series.geographic_type).or_default() += 1;
        }
        counts
    }
}

/// Assembles series onto events, then adds region and division aggregates
/// when a geography lookup is supplied.
///
/// # Errors
///
/// Propagates errors from [`assemble`] and [`aggregate`].
pub fn build_panel(
    series: &[SeriesValues],
    events: &[RevisionEvent],
    geography: Option<&GeographyMap>,
    options: &AssembleOptions,
) -> Result<Panel, PanelError> {
    let rows = assemble(series, events, options)?;
    let panel = match geography {
        Some(map) => {
            let (rows, report) = aggregate(rows, map)?;
            Panel { rows, report }
        }
        None => Panel {
            rows,
            report: AggregationReport::default(),
        },
    };
    info!(
        n_rows = panel.rows.len(),
        n_unmapped = panel.report.total_unmapped(),
        "built revision panel"
    );
    Ok(panel)
}

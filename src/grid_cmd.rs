//! Grid command: expand release calendars into the vintage-date table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span};

use vintage_grid::{RevisionEvent, expand};
use vintage_io::{read_facts, write_vintage_dates};
use vintage_release::{PublicationFact, normalize, supplemental_overrides};

use crate::cli::GridArgs;
use crate::config::VintageConfig;
use crate::convert;

/// Reads scraped facts and overrides and merges them.
///
/// Overrides from `[io].overrides` take precedence over the built-in
/// supplemental dates; neither shadows a scraped date.
pub fn load_facts(config: &VintageConfig) -> Result<Vec<PublicationFact>> {
    let path = config.io.release_dates.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no release dates: set [io].release_dates in config")
    })?;
    let scraped = read_facts(path)
        .with_context(|| format!("failed to read release dates: {}", path.display()))?;

    let mut overrides = match config.io.overrides {
        Some(ref path) => read_facts(path)
            .with_context(|| format!("failed to read overrides: {}", path.display()))?,
        None => Vec::new(),
    };
    overrides.extend(supplemental_overrides().context("invalid supplemental release dates")?);

    Ok(normalize(&scraped, &overrides))
}

/// Loads facts and expands them into revision events effective by `as_of`.
///
/// Returns the number of facts alongside the events.
pub fn build_events(
    config: &VintageConfig,
    as_of: NaiveDate,
) -> Result<(usize, Vec<RevisionEvent>)> {
    let facts = load_facts(config)?;
    let policies = convert::build_policy_table(&config.policy)?;
    let events = expand(&facts, &policies, as_of).context("failed to expand revision grid")?;
    Ok((facts.len(), events))
}

/// Run the grid pipeline.
pub fn run(args: GridArgs) -> Result<()> {
    let _cmd = info_span!("grid").entered();
    let config = VintageConfig::load(&args.config)?;
    let as_of = convert::resolve_as_of(args.as_of, config.as_of);
    let writer_cfg = convert::build_writer_config(&config.io)?;

    info!(%as_of, "expanding revision grid");
    let (n_facts, events) = build_events(&config, as_of)?;

    let output = args.output.unwrap_or_else(|| config.io.vintage_dates.clone());
    write_vintage_dates(&output, &events, &writer_cfg)
        .with_context(|| format!("failed to write vintage dates: {}", output.display()))?;
    info!(
        n_facts,
        n_events = events.len(),
        path = %output.display(),
        "vintage dates written"
    );
    Ok(())
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level vintage configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VintageConfig {
    /// Cutoff date for revision events; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Per-publication revision policy overrides.
    #[serde(default)]
    pub policy: PolicyOverrides,

    /// Revision triangles feeding the panel.
    #[serde(default)]
    pub triangle: Vec<TriangleToml>,

    /// Wide quarterly revision table.
    #[serde(default)]
    pub qcew: Option<QcewToml>,

    /// Initial/latest level tables (state payrolls).
    #[serde(default)]
    pub levels: Vec<LevelsToml>,

    /// Panel assembly settings.
    #[serde(default)]
    pub panel: PanelToml,
}

impl VintageConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub release_dates: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
    #[serde(default = "default_vintage_dates")]
    pub vintage_dates: PathBuf,
    #[serde(default = "default_panel")]
    pub panel: PathBuf,
    pub geography: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            release_dates: None,
            overrides: None,
            vintage_dates: default_vintage_dates(),
            panel: default_panel(),
            geography: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_vintage_dates() -> PathBuf {
    PathBuf::from("vintage_dates.parquet")
}
fn default_panel() -> PathBuf {
    PathBuf::from("revisions.parquet")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOverrides {
    pub ces: Option<PolicyToml>,
    pub sae: Option<PolicyToml>,
    pub qcew: Option<PolicyToml>,
}

/// Revision policy parameters. Omitted fields keep the publication's
/// built-in value; `horizons` switches a monthly policy to rolling
/// benchmarks.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyToml {
    pub max_revision: Option<u8>,
    pub anchor_month: Option<u32>,
    pub horizons: Option<u8>,
    pub first_quarter_max: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriangleToml {
    pub path: PathBuf,
    #[serde(default = "default_publication")]
    pub publication: String,
    #[serde(default = "default_true")]
    pub seasonally_adjusted: bool,
    #[serde(default = "default_national")]
    pub industry_type: String,
    #[serde(default = "default_code")]
    pub industry_code: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default = "default_max_revision")]
    pub max_revision: u8,
}

fn default_publication() -> String {
    "ces".to_string()
}
fn default_true() -> bool {
    true
}
fn default_national() -> String {
    "national".to_string()
}
fn default_code() -> String {
    "00".to_string()
}
fn default_max_revision() -> u8 {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QcewToml {
    pub path: PathBuf,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1000.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelsToml {
    pub path: PathBuf,
    #[serde(default = "default_levels_publication")]
    pub publication: String,
    #[serde(default = "default_unit_scale")]
    pub scale: f64,
}

fn default_levels_publication() -> String {
    "sae".to_string()
}
fn default_unit_scale() -> f64 {
    1.0
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelToml {
    #[serde(default)]
    pub keep_missing_vintage: bool,
    /// Region and division codes by state FIPS, replacing or extending the
    /// geography lookup.
    #[serde(default)]
    pub geography_overrides: BTreeMap<String, GeographyOverrideToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeographyOverrideToml {
    pub region: String,
    pub division: String,
}

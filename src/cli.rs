use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Vintage revision timeline engine.
#[derive(Parser)]
#[command(
    name = "vintage",
    version,
    about = "Revision-indexed vintage panels for multi-release economic statistics"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Expand release calendars into the vintage-date table.
    Grid(GridArgs),
    /// Build the revision panel from triangles and wide revision tables.
    Panel(PanelArgs),
}

/// Arguments for the `grid` subcommand.
#[derive(clap::Args)]
pub struct GridArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "vintage.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cutoff date (YYYY-MM-DD); events effective later are dropped.
    #[arg(long = "as-of")]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for the `panel` subcommand.
#[derive(clap::Args)]
pub struct PanelArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "vintage.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cutoff date (YYYY-MM-DD); events effective later are dropped.
    #[arg(long = "as-of")]
    pub as_of: Option<NaiveDate>,

    /// Write a JSON run summary to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

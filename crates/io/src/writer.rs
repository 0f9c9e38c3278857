//! High-level Parquet writer configuration and orchestration.

use std::path::Path;

use parquet::file::properties::WriterProperties;
use tracing::info;
use vintage_grid::RevisionEvent;
use vintage_panel::PanelRow;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for Parquet output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Maximum number of rows per row group.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        self.validate()?;
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Writes revision events as the vintage-date table.
///
/// Columns: `publication`, `ref_date`, `vintage_date`, `revision`,
/// `benchmark_revision`, one row per event in input order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_vintage_dates(
    path: &Path,
    events: &[RevisionEvent],
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::vintage_schema();
    let batch = parquet_write::events_to_record_batch(events, &schema)?;
    parquet_write::write_batches(path, &[batch], &schema, props)?;
    info!(path = %path.display(), n_rows = events.len(), "wrote vintage dates");
    Ok(())
}

/// Writes a revision panel.
///
/// Columns: `source`, `seasonally_adjusted`, `geographic_type`,
/// `geographic_code`, `industry_type`, `industry_code`, `reference_date`,
/// `effective_date` (nullable), `revision_index`, `benchmark_rank`
/// (nullable), `value`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_panel(path: &Path, rows: &[PanelRow], config: &WriterConfig) -> Result<(), IoError> {
    let props = config.properties()?;
    let schema = parquet_write::panel_schema();
    let batch = parquet_write::panel_to_record_batch(rows, &schema)?;
    parquet_write::write_batches(path, &[batch], &schema, props)?;
    info!(path = %path.display(), n_rows = rows.len(), "wrote revision panel");
    Ok(())
}

//! Error types for vintage-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the vintage-io crate.
///
/// This enum covers missing files, format errors from CSV and Parquet,
/// malformed records, and schema mismatches encountered when reading or
/// writing release calendars, revision tables and panels.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file extension names no supported format.
    #[error("unsupported file format: {} (expected .csv or .parquet)", path.display())]
    UnsupportedFormat {
        /// Path with the unrecognized extension.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when one record of an input file cannot be interpreted.
    #[error("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        /// File containing the record.
        path: PathBuf,
        /// One-based line number (the header is line 1).
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error from revision-table construction.
    #[error(transparent)]
    Triangle(#[from] vintage_triangle::TriangleError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_unsupported_format() {
        let err = IoError::UnsupportedFormat {
            path: PathBuf::from("dates.xlsx"),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format: dates.xlsx (expected .csv or .parquet)"
        );
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "ref_date".to_string(),
            path: PathBuf::from("/data/release_dates.parquet"),
        };
        assert_eq!(
            err.to_string(),
            "column 'ref_date' not found in /data/release_dates.parquet"
        );
    }

    #[test]
    fn display_invalid_record() {
        let err = IoError::InvalidRecord {
            path: PathBuf::from("tri.csv"),
            line: 7,
            reason: "invalid cell value: \"x\"".to_string(),
        };
        assert_eq!(err.to_string(), "tri.csv:7: invalid cell value: \"x\"");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 1,
            details: "row_group_size must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "1 validation error(s): row_group_size must be greater than 0"
        );
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn from_arrow_error() {
        let err: IoError = arrow::error::ArrowError::SchemaError("bad".to_string()).into();
        assert!(matches!(err, IoError::Parquet { .. }));
    }

    #[test]
    fn from_triangle_error() {
        let err: IoError = vintage_triangle::TriangleError::InvalidScale { scale: 0.0 }.into();
        assert!(matches!(err, IoError::Triangle(_)));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}

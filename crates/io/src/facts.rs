//! Publication-fact files (scraped release calendars and overrides).

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use vintage_calendar::to_reference;
use vintage_release::{Publication, PublicationFact};

use crate::error::IoError;
use crate::parquet_read;

/// Tabular file formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl FileFormat {
    /// Detects the format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") | Some("pq") => Ok(Self::Parquet),
            _ => Err(IoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactRecord {
    publication: String,
    ref_date: NaiveDate,
    vintage_date: NaiveDate,
}

/// Reads publication facts from a CSV or Parquet file with columns
/// `publication`, `ref_date`, `vintage_date`.
///
/// CSV dates are `YYYY-MM-DD`; Parquet dates are `date32`. Reference dates
/// are normalized to day 12 of their month. Extra columns are ignored.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is missing,
/// [`IoError::UnsupportedFormat`] for an unknown extension, and
/// [`IoError::InvalidRecord`] for rows with an unknown publication or an
/// unparsable date.
pub fn read_facts(path: &Path) -> Result<Vec<PublicationFact>, IoError> {
    let facts = match FileFormat::from_path(path)? {
        FileFormat::Csv => read_facts_csv(path)?,
        FileFormat::Parquet => parquet_read::read_facts(path)?,
    };
    info!(path = %path.display(), n_facts = facts.len(), "read publication facts");
    Ok(facts)
}

fn read_facts_csv(path: &Path) -> Result<Vec<PublicationFact>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path)?;

    let mut facts = Vec::new();
    for (line_num, result) in reader.deserialize::<FactRecord>().enumerate() {
        // +2: one-based, after the header row.
        let line = line_num as u64 + 2;
        let invalid = |reason: String| IoError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason,
        };
        let record = result.map_err(|e| invalid(e.to_string()))?;
        let publication: Publication = record
            .publication
            .parse()
            .map_err(|e: vintage_release::ReleaseError| invalid(e.to_string()))?;
        facts.push(PublicationFact::new(
            publication,
            to_reference(record.ref_date),
            record.vintage_date,
        ));
    }
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn format_detection() {
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")).unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_path(Path::new("a.parquet")).unwrap(),
            FileFormat::Parquet
        );
        assert!(matches!(
            FileFormat::from_path(Path::new("a.json")),
            Err(IoError::UnsupportedFormat { .. })
        ));
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn reads_csv_and_normalizes_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "facts.csv",
            "publication,ref_date,vintage_date\nCES,2023-06-01,2023-07-07\nqcew,2023-03-12,2023-09-06\n",
        );
        let facts = read_facts(&path).unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].publication, Publication::Ces);
        assert_eq!(
            facts[0].reference_date,
            NaiveDate::from_ymd_opt(2023, 6, 12).unwrap()
        );
        assert_eq!(facts[1].publication, Publication::Qcew);
    }

    #[test]
    fn extra_columns_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "facts.csv",
            "publication,ref_date,vintage_date,source\nsae,2016-01-12,2016-03-14,manual\n",
        );
        assert_eq!(read_facts(&path).unwrap().len(), 1);
    }

    #[test]
    fn unknown_publication_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "facts.csv",
            "publication,ref_date,vintage_date\nces,2023-06-12,2023-07-07\njolts,2023-06-12,2023-08-01\n",
        );
        match read_facts(&path).unwrap_err() {
            IoError::InvalidRecord { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("jolts"));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "facts.csv",
            "publication,ref_date,vintage_date\nces,June 2023,2023-07-07\n",
        );
        assert!(matches!(
            read_facts(&path),
            Err(IoError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_facts(Path::new("/nonexistent/facts.csv")),
            Err(IoError::FileNotFound { .. })
        ));
    }
}

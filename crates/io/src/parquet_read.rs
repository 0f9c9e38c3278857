//! Low-level Parquet reading and column extraction.

use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, PrimitiveArray, RecordBatch, StringArray};
use arrow::datatypes::{ArrowPrimitiveType, Date32Type, UInt8Type};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use vintage_calendar::to_reference;
use vintage_grid::RevisionEvent;
use vintage_release::{Publication, PublicationFact};

use crate::date32::from_date32;
use crate::error::IoError;

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Looks up a column by name.
fn column<'a>(batch: &'a RecordBatch, name: &str, path: &Path) -> Result<&'a ArrayRef, IoError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn wrong_type(name: &str, expected: &str, array: &ArrayRef) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!(
            "column '{name}': expected {expected}, got {}",
            array.data_type()
        ),
    }
}

fn utf8_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
    path: &Path,
) -> Result<&'a StringArray, IoError> {
    let array = column(batch, name, path)?;
    array
        .as_string_opt::<i32>()
        .ok_or_else(|| wrong_type(name, "utf8", array))
}

fn primitive_column<'a, T: ArrowPrimitiveType>(
    batch: &'a RecordBatch,
    name: &str,
    expected: &str,
    path: &Path,
) -> Result<&'a PrimitiveArray<T>, IoError> {
    let array = column(batch, name, path)?;
    if array.null_count() > 0 {
        return Err(IoError::Validation {
            count: array.null_count(),
            details: format!("column '{name}' contains nulls"),
        });
    }
    array
        .as_primitive_opt::<T>()
        .ok_or_else(|| wrong_type(name, expected, array))
}

fn date_at(days: i32, name: &str, path: &Path, row: usize) -> Result<NaiveDate, IoError> {
    from_date32(days).ok_or_else(|| IoError::InvalidRecord {
        path: path.to_path_buf(),
        // Parquet rows have no header line.
        line: row as u64 + 1,
        reason: format!("{name} out of range: {days} days"),
    })
}

fn publication_at(value: &str, path: &Path, row: usize) -> Result<Publication, IoError> {
    value.parse().map_err(|e: vintage_release::ReleaseError| IoError::InvalidRecord {
        path: path.to_path_buf(),
        line: row as u64 + 1,
        reason: e.to_string(),
    })
}

/// Reads publication facts from a Parquet file with columns `publication`
/// (utf8), `ref_date` and `vintage_date` (date32).
///
/// Reference dates are normalized to day 12 of their month.
pub(crate) fn read_facts(path: &Path) -> Result<Vec<PublicationFact>, IoError> {
    let mut facts = Vec::new();
    let mut offset = 0usize;
    for batch in read_batches(path)? {
        let publication = utf8_column(&batch, "publication", path)?;
        let ref_date = primitive_column::<Date32Type>(&batch, "ref_date", "date32", path)?;
        let vintage_date = primitive_column::<Date32Type>(&batch, "vintage_date", "date32", path)?;

        for i in 0..batch.num_rows() {
            let row = offset + i;
            facts.push(PublicationFact::new(
                publication_at(publication.value(i), path, row)?,
                to_reference(date_at(ref_date.value(i), "ref_date", path, row)?),
                date_at(vintage_date.value(i), "vintage_date", path, row)?,
            ));
        }
        offset += batch.num_rows();
    }
    Ok(facts)
}

/// Reads a vintage-date table written by
/// [`write_vintage_dates`](crate::write_vintage_dates).
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingColumn`] or
/// [`IoError::Validation`] for unreadable or mistyped files, and
/// [`IoError::InvalidRecord`] for unknown publications or out-of-range dates.
pub fn read_vintage_dates(path: &Path) -> Result<Vec<RevisionEvent>, IoError> {
    let mut events = Vec::new();
    let mut offset = 0usize;
    for batch in read_batches(path)? {
        let publication = utf8_column(&batch, "publication", path)?;
        let ref_date = primitive_column::<Date32Type>(&batch, "ref_date", "date32", path)?;
        let vintage_date = primitive_column::<Date32Type>(&batch, "vintage_date", "date32", path)?;
        let revision = primitive_column::<UInt8Type>(&batch, "revision", "uint8", path)?;
        let benchmark =
            primitive_column::<UInt8Type>(&batch, "benchmark_revision", "uint8", path)?;

        for i in 0..batch.num_rows() {
            let row = offset + i;
            events.push(RevisionEvent {
                publication: publication_at(publication.value(i), path, row)?,
                reference_date: date_at(ref_date.value(i), "ref_date", path, row)?,
                revision_index: revision.value(i),
                benchmark_rank: benchmark.value(i),
                effective_date: date_at(vintage_date.value(i), "vintage_date", path, row)?,
            });
        }
        offset += batch.num_rows();
    }
    Ok(events)
}

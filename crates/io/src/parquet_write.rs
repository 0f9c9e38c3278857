//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, RecordBatch, StringArray, UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use vintage_grid::RevisionEvent;
use vintage_panel::PanelRow;

use crate::date32::to_date32;
use crate::error::IoError;

/// Builds the Arrow schema for the vintage-date table.
pub(crate) fn vintage_schema() -> Schema {
    Schema::new(vec![
        Field::new("publication", DataType::Utf8, false),
        Field::new("ref_date", DataType::Date32, false),
        Field::new("vintage_date", DataType::Date32, false),
        Field::new("revision", DataType::UInt8, false),
        Field::new("benchmark_revision", DataType::UInt8, false),
    ])
}

/// Builds the Arrow schema for the revision panel.
///
/// `effective_date` and `benchmark_rank` are nullable for values kept
/// without a matching revision event.
pub(crate) fn panel_schema() -> Schema {
    Schema::new(vec![
        Field::new("source", DataType::Utf8, false),
        Field::new("seasonally_adjusted", DataType::Boolean, false),
        Field::new("geographic_type", DataType::Utf8, false),
        Field::new("geographic_code", DataType::Utf8, false),
        Field::new("industry_type", DataType::Utf8, false),
        Field::new("industry_code", DataType::Utf8, false),
        Field::new("reference_date", DataType::Date32, false),
        Field::new("effective_date", DataType::Date32, true),
        Field::new("revision_index", DataType::UInt8, false),
        Field::new("benchmark_rank", DataType::UInt8, true),
        Field::new("value", DataType::Float64, false),
    ])
}

/// Converts revision events into one [`RecordBatch`] matching
/// [`vintage_schema`].
pub(crate) fn events_to_record_batch(
    events: &[RevisionEvent],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            events.iter().map(|e| e.publication.as_str()),
        )),
        Arc::new(Date32Array::from_iter_values(
            events.iter().map(|e| to_date32(e.reference_date)),
        )),
        Arc::new(Date32Array::from_iter_values(
            events.iter().map(|e| to_date32(e.effective_date)),
        )),
        Arc::new(UInt8Array::from_iter_values(
            events.iter().map(|e| e.revision_index),
        )),
        Arc::new(UInt8Array::from_iter_values(
            events.iter().map(|e| e.benchmark_rank),
        )),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Converts panel rows into one [`RecordBatch`] matching [`panel_schema`].
pub(crate) fn panel_to_record_batch(
    rows: &[PanelRow],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let utf8 = |f: fn(&PanelRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(rows.iter().map(f)))
    };

    let columns: Vec<ArrayRef> = vec![
        utf8(|r| r.series.publication.as_str()),
        Arc::new(BooleanArray::from(
            rows.iter()
                .map(|r| r.series.seasonally_adjusted)
                .collect::<Vec<_>>(),
        )),
        utf8(|r| r.series.geographic_type.as_str()),
        utf8(|r| r.series.geographic_code.as_str()),
        utf8(|r| r.series.industry_type.as_str()),
        utf8(|r| r.series.industry_code.as_str()),
        Arc::new(Date32Array::from_iter_values(
            rows.iter().map(|r| to_date32(r.reference_date)),
        )),
        Arc::new(Date32Array::from_iter(
            rows.iter().map(|r| r.effective_date.map(to_date32)),
        )),
        Arc::new(UInt8Array::from_iter_values(
            rows.iter().map(|r| r.revision_index),
        )),
        Arc::new(UInt8Array::from_iter(rows.iter().map(|r| r.benchmark_rank))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.value))),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: format!("{}: {e}", path.display()),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::{Date32Type, UInt8Type};
    use chrono::NaiveDate;
    use vintage_panel::SeriesKey;
    use vintage_release::Publication;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn vintage_schema_columns() {
        let schema = vintage_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec!["publication", "ref_date", "vintage_date", "revision", "benchmark_revision"]
        );
    }

    #[test]
    fn panel_schema_nullability() {
        let schema = panel_schema();
        assert_eq!(schema.fields().len(), 11);
        assert!(schema.field_with_name("effective_date").unwrap().is_nullable());
        assert!(schema.field_with_name("benchmark_rank").unwrap().is_nullable());
        assert!(!schema.field_with_name("value").unwrap().is_nullable());
    }

    #[test]
    fn events_batch() {
        let events = [RevisionEvent {
            publication: Publication::Sae,
            reference_date: ymd(2016, 1, 12),
            revision_index: 1,
            benchmark_rank: 2,
            effective_date: ymd(2017, 3, 17),
        }];
        let schema = vintage_schema();
        let batch = events_to_record_batch(&events, &schema).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.column(0).as_string::<i32>().value(0), "sae");
        assert_eq!(batch.column(1).as_primitive::<Date32Type>().value(0), 16_812);
        assert_eq!(batch.column(4).as_primitive::<UInt8Type>().value(0), 2);
    }

    #[test]
    fn panel_batch_nulls() {
        let rows = [PanelRow {
            series: SeriesKey::national(Publication::Ces, true),
            reference_date: ymd(2016, 1, 12),
            effective_date: None,
            revision_index: 0,
            benchmark_rank: None,
            value: 143_000.0,
        }];
        let schema = panel_schema();
        let batch = panel_to_record_batch(&rows, &schema).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert!(batch.column(7).is_null(0));
        assert!(batch.column(9).is_null(0));
        assert!(batch.column(1).as_boolean().value(0));
    }
}

//! # vintage-io
//!
//! File boundary of the vintage workspace: reads release calendars,
//! revision triangles, wide revision tables, initial/latest level tables
//! and the geography lookup from
//! CSV or Parquet, and writes the vintage-date table and revision panel to
//! Parquet.
//!
//! | Input / output            | Format         | Function                  |
//! |---------------------------|----------------|---------------------------|
//! | Publication facts         | CSV or Parquet | [`read_facts`]            |
//! | Revision triangle         | CSV            | [`read_triangle_csv`]     |
//! | Wide revision table       | CSV            | [`read_wide_revisions`]   |
//! | Initial/latest levels     | CSV            | [`read_revision_levels`]  |
//! | Geography lookup          | CSV            | [`read_geography`]        |
//! | Vintage dates             | Parquet        | [`write_vintage_dates`], [`read_vintage_dates`] |
//! | Revision panel            | Parquet        | [`write_panel`]           |

mod date32;
mod error;
mod facts;
mod geography;
mod levels_csv;
mod parquet_read;
mod parquet_write;
mod triangle_csv;
mod wide_csv;
mod writer;

pub use error::IoError;
pub use facts::{FileFormat, read_facts};
pub use geography::{GeographyTable, NATIONAL_AREA, NATIONAL_CODE, read_geography};
pub use levels_csv::read_revision_levels;
pub use parquet_read::read_vintage_dates;
pub use triangle_csv::read_triangle_csv;
pub use wide_csv::{REVISION_COLUMNS, read_wide_revisions};
pub use writer::{Compression, WriterConfig, write_panel, write_vintage_dates};

//! # vintage-panel
//!
//! Builds the revision panel: every value of every series, stamped with the
//! date it became public.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     S["SeriesValues"] -->|"assemble()"| R["PanelRow"]
//!     E["RevisionEvent"] -->|"assemble()"| R
//!     R -->|"aggregate()"| A["+ region / division rows"]
//!     G["GeographyMap"] --> A
//!     A --> P["Panel"]
//! ```
//!
//! ## Key
//!
//! Each row is unique on `(source, seasonally_adjusted, geographic_type,
//! geographic_code, industry_type, industry_code, reference_date,
//! effective_date, revision_index, benchmark_rank)`. A repeated key is an
//! error, not a silent merge.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `row` | Series identity, series values and panel rows |
//! | `assemble` | Join of series values onto revision events |
//! | `geography` | Geographic levels and state lookup |
//! | `aggregate` | Region and division sums |
//! | `build` | Assembly plus aggregation |
//! | `error` | Error types |

mod aggregate;
mod assemble;
mod build;
mod error;
mod geography;
mod row;

pub use aggregate::{AggregationReport, aggregate};
pub use assemble::{AssembleOptions, MissingVintage, assemble, check_unique};
pub use build::{Panel, build_panel};
pub use error::PanelError;
pub use geography::{GeographicType, GeographyMap};
pub use row::{PanelKey, PanelRow, SeriesKey, SeriesValues};

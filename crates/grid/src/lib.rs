//! # vintage-grid
//!
//! Revision calendars: expands one publication fact per reference period
//! into every date on which that period's value changed.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//!  │ PublicationFacts │────▶│ ordinary events  │────▶│ as_of filter     │
//!  │ + PolicyTable    │     │ + benchmarks     │     │ + sort           │
//!  └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! | Series class | Revisions | Step | Benchmarks |
//! |--------------|-----------|------|------------|
//! | `AnnualBenchmark` (ces) | 0..=2 | 1 month | next January's release |
//! | `RollingBenchmark` (sae) | 0..=1 | 1 month | March release of Y+1, Y+2 |
//! | `Quarterly` (qcew) | 0..=4 in Q1, one fewer per quarter | 3 months | none |
//!
//! Benchmark events reuse the policy's highest ordinary revision index and
//! carry a positive `benchmark_rank`.

mod error;
mod event;
mod expand;
mod policy;

pub use error::GridError;
pub use event::{EventSortKey, RevisionEvent};
pub use expand::expand;
pub use policy::{BenchmarkRule, PolicyTable, RevisionPolicy};

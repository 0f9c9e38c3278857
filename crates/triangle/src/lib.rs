//! # vintage-triangle
//!
//! Turns published revision tables into per-revision series.
//!
//! Two layouts are supported:
//!
//! - **Triangles**: rows are successive releases, columns are reference
//!   periods. Revision `k` of a period is read along the `k`-th diagonal
//!   below the main one.
//! - **Wide tables**: one row per reference period with one column per
//!   revision (initial, first revised, ...).
//!
//! ```text
//!              Jan   Feb   Mar          revision 0: (0,0) (1,1) (2,2)
//!   rel Jan  [ 100    .     .  ]        revision 1: (1,0) (2,1)
//!   rel Feb  [ 101   200    .  ]        revision 2: (2,0)
//!   rel Mar  [ 102   201   300 ]
//! ```
//!
//! Sentinel cells (`Not yet published`, `Not applicable`, `.`, `NA`, empty)
//! are absent values and never become zero.

mod cell;
mod error;
mod matrix;
mod point;
mod wide;

pub use cell::{SENTINELS, is_sentinel, parse_cell};
pub use error::TriangleError;
pub use matrix::TriangularMatrix;
pub use point::RevisionPoint;
pub use wide::{WideRow, unpivot};

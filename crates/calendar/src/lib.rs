//! # vintage-calendar
//!
//! Pure date arithmetic for monthly and quarterly reference periods.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(year, month)"] -->|"reference_date()"| B["NaiveDate (day 12)"]
//!     L["Mon_YY label"] -->|"parse_month_label()"| B
//!     B -->|"add_months()"| C["vintage date"]
//!     B -->|"month_sequence()"| D["Vec of reference dates"]
//!     B -->|".month() / quarter()"| E["quarter 1..=4"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use vintage_calendar::{add_months, month_sequence, quarter, reference_date};
//!
//! let june = reference_date(2023, 6).unwrap();
//! assert_eq!(quarter(6).unwrap(), 2);
//!
//! let next = add_months(june, 1).unwrap();
//! assert_eq!(next.to_string(), "2023-07-12");
//!
//! let year = month_sequence(reference_date(2023, 1).unwrap(), 12).unwrap();
//! assert_eq!(year.len(), 12);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reference` | Day-12 reference-date convention |
//! | `months` | Calendar-month addition with end-of-month clamping |
//! | `quarter` | Quarter membership |
//! | `sequence` | Consecutive monthly reference dates |
//! | `label` | Month names and `Mon_YY` column labels |
//! | `error` | Error types |

mod error;
mod label;
mod months;
mod quarter;
mod reference;
mod sequence;

pub use error::CalendarError;
pub use label::{MONTH_NAMES, month_from_name, parse_month_label};
pub use months::add_months;
pub use quarter::{quarter, quarter_end_month};
pub use reference::{REFERENCE_DAY, reference_date, to_reference};
pub use sequence::month_sequence;

//! # vintage-release
//!
//! Publication facts: the authoritative first-publication date of each
//! reference period of each series.
//!
//! Scraped facts are merged with manual overrides by anti-join: an override
//! only fills a `(publication, reference_date)` key the scrape did not
//! produce.
//!
//! ```
//! use vintage_release::{PublicationFact, normalize, supplemental_overrides};
//!
//! let scraped: Vec<PublicationFact> = Vec::new();
//! let facts = normalize(&scraped, &supplemental_overrides().unwrap());
//! assert_eq!(facts.len(), 5);
//! ```

mod error;
mod fact;
mod normalize;
mod publication;
mod supplemental;

pub use error::ReleaseError;
pub use fact::{FactKey, PublicationFact};
pub use normalize::normalize;
pub use publication::{Frequency, Publication};
pub use supplemental::supplemental_overrides;

//! Merging scraped publication facts with manual overrides.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::fact::{FactKey, PublicationFact};

/// Merges scraped facts with overrides into one fact per key.
///
/// Returns the union of `scraped` with the overrides whose
/// `(publication, reference_date)` key is absent from `scraped`. Overrides
/// only fill gaps; they never shadow a scraped date. When either input
/// repeats a key, its first occurrence wins.
///
/// The result is sorted by key. A key missing from both inputs is simply
/// absent from the result.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vintage_release::{Publication, PublicationFact, normalize};
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let scraped = [PublicationFact::new(Publication::Ces, d(2016, 1, 12), d(2016, 2, 5))];
/// let overrides = [
///     PublicationFact::new(Publication::Ces, d(2016, 1, 12), d(2016, 2, 1)),
///     PublicationFact::new(Publication::Ces, d(2016, 2, 12), d(2016, 3, 4)),
/// ];
/// let facts = normalize(&scraped, &overrides);
/// assert_eq!(facts.len(), 2);
/// assert_eq!(facts[0].publication_date, d(2016, 2, 5));
/// ```
#[tracing::instrument(skip_all, fields(n_scraped = scraped.len(), n_overrides = overrides.len()))]
pub fn normalize(
    scraped: &[PublicationFact],
    overrides: &[PublicationFact],
) -> Vec<PublicationFact> {
    let mut merged: BTreeMap<FactKey, NaiveDate> = BTreeMap::new();

    let mut duplicates = 0usize;
    for fact in scraped {
        if merged.contains_key(&fact.key()) {
            duplicates += 1;
            continue;
        }
        merged.insert(fact.key(), fact.publication_date);
    }
    if duplicates > 0 {
        warn!(duplicates, "scraped facts repeat keys; keeping first occurrence");
    }

    let mut filled = 0usize;
    for fact in overrides {
        if merged.contains_key(&fact.key()) {
            debug!(
                publication = %fact.publication,
                reference_date = %fact.reference_date,
                "override shadowed by existing fact"
            );
            continue;
        }
        merged.insert(fact.key(), fact.publication_date);
        filled += 1;
    }

    info!(n_facts = merged.len(), filled, "normalized publication facts");

    merged
        .into_iter()
        .map(|((publication, reference_date), publication_date)| {
            PublicationFact::new(publication, reference_date, publication_date)
        })
        .collect()
}

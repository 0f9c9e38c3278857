//! Publication facts.

use chrono::NaiveDate;

use crate::publication::Publication;

/// When a reference period of a publication was first made public.
///
/// Facts are keyed by `(publication, reference_date)`; see [`FactKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicationFact {
    /// Which series this fact belongs to.
    pub publication: Publication,
    /// Reference period, stamped on day 12 of the reference month.
    pub reference_date: NaiveDate,
    /// Date the reference period was first published.
    pub publication_date: NaiveDate,
}

/// Identity of a fact: one publication date per series and reference period.
pub type FactKey = (Publication, NaiveDate);

impl PublicationFact {
    /// Creates a new fact.
    pub fn new(
        publication: Publication,
        reference_date: NaiveDate,
        publication_date: NaiveDate,
    ) -> Self {
        Self {
            publication,
            reference_date,
            publication_date,
        }
    }

    /// Returns the `(publication, reference_date)` key.
    pub fn key(&self) -> FactKey {
        (self.publication, self.reference_date)
    }
}

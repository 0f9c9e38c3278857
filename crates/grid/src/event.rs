//! Revision events.

use chrono::NaiveDate;
use vintage_release::Publication;

/// The date as of which one revision of one reference period became public.
///
/// `benchmark_rank == 0` marks an ordinary revision; a positive rank marks
/// the n-th out-of-cycle benchmark, which reuses the policy's highest
/// ordinary revision index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevisionEvent {
    /// Series the event belongs to.
    pub publication: Publication,
    /// Reference period (day 12 of the reference month).
    pub reference_date: NaiveDate,
    /// Ordinary revision index; 0 is the initial release.
    pub revision_index: u8,
    /// Benchmark rank; 0 for ordinary revisions.
    pub benchmark_rank: u8,
    /// Date the revision became public.
    pub effective_date: NaiveDate,
}

/// Sort key: `(publication, reference_date, effective_date, revision_index,
/// benchmark_rank)`.
pub type EventSortKey = (Publication, NaiveDate, NaiveDate, u8, u8);

impl RevisionEvent {
    /// Whether this is an out-of-cycle benchmark revision.
    pub fn is_benchmark(&self) -> bool {
        self.benchmark_rank > 0
    }

    /// Key used to order grid output.
    pub fn sort_key(&self) -> EventSortKey {
        (
            self.publication,
            self.reference_date,
            self.effective_date,
            self.revision_index,
            self.benchmark_rank,
        )
    }
}

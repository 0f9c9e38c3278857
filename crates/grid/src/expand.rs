//! Expansion of publication facts into revision events.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};
use vintage_calendar::add_months;
use vintage_release::{Publication, PublicationFact};

use crate::error::GridError;
use crate::event::RevisionEvent;
use crate::policy::{BenchmarkRule, PolicyTable, RevisionPolicy};

/// Expands publication facts into the full revision calendar.
///
/// Every fact yields one ordinary event per revision index of its
/// publication's policy, dated by calendar-month addition from the
/// publication date. Monthly policies with a benchmark rule add one event per
/// benchmark horizon for every reference period whose anchor release exists.
///
/// Events dated after `as_of` are not yet knowable and are dropped. The
/// output is sorted by [`RevisionEvent::sort_key`], so identical input and
/// `as_of` always give identical output.
///
/// # Errors
///
/// Returns [`GridError::InvalidPolicy`] if the table fails validation,
/// [`GridError::MissingPolicy`] if a fact's publication has no policy, or
/// [`GridError::Calendar`] if date arithmetic overflows.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vintage_grid::{PolicyTable, expand};
/// use vintage_release::{Publication, PublicationFact};
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let facts = [PublicationFact::new(Publication::Ces, d(2023, 6, 12), d(2023, 7, 7))];
/// let events = expand(&facts, &PolicyTable::default(), d(2025, 1, 1)).unwrap();
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[2].effective_date, d(2023, 9, 7));
/// ```
#[tracing::instrument(skip_all, fields(n_facts = facts.len(), as_of = %as_of))]
pub fn expand(
    facts: &[PublicationFact],
    policies: &PolicyTable,
    as_of: NaiveDate,
) -> Result<Vec<RevisionEvent>, GridError> {
    policies.validate()?;

    let mut by_publication: BTreeMap<Publication, Vec<&PublicationFact>> = BTreeMap::new();
    for fact in facts {
        by_publication.entry(fact.publication).or_default().push(fact);
    }

    let mut events = Vec::new();
    for (&publication, pub_facts) in &by_publication {
        let policy = policies
            .get(publication)
            .ok_or(GridError::MissingPolicy { publication })?;

        let start = events.len();
        for fact in pub_facts {
            ordinary_events(fact, policy, &mut events)?;
        }
        let n_ordinary = events.len() - start;

        if let Some(rule) = policy.benchmark() {
            // Benchmark rows reuse the highest ordinary index; monthly
            // policies have the same maximum for every month.
            let max_revision = policy.max_revision(rule.anchor_month)?;
            benchmark_events(publication, pub_facts, rule, max_revision, &mut events);
        }

        debug!(
            publication = %publication,
            n_ordinary,
            n_benchmark = events.len() - start - n_ordinary,
            "expanded revision grid"
        );
    }

    let n_total = events.len();
    events.retain(|e| e.effective_date <= as_of);
    events.sort_by_key(RevisionEvent::sort_key);

    info!(
        n_events = events.len(),
        n_future = n_total - events.len(),
        "built revision grid"
    );
    Ok(events)
}

/// Appends the ordinary revisions `0..=max` of one fact.
fn ordinary_events(
    fact: &PublicationFact,
    policy: &RevisionPolicy,
    out: &mut Vec<RevisionEvent>,
) -> Result<(), GridError> {
    let max_revision = policy.max_revision(fact.reference_date.month())?;
    let step = policy.months_per_revision();
    for revision_index in 0..=max_revision {
        let effective_date = add_months(fact.publication_date, u32::from(revision_index) * step)?;
        out.push(RevisionEvent {
            publication: fact.publication,
            reference_date: fact.reference_date,
            revision_index,
            benchmark_rank: 0,
            effective_date,
        });
    }
    Ok(())
}

/// Appends benchmark revisions for every reference period of one publication.
///
/// A reference period in year `Y` receives rank `h` when the anchor-month
/// reference period of year `Y + h` has a publication fact; the event is
/// dated by that fact.
fn benchmark_events(
    publication: Publication,
    facts: &[&PublicationFact],
    rule: BenchmarkRule,
    max_revision: u8,
    out: &mut Vec<RevisionEvent>,
) {
    let mut anchors: BTreeMap<i32, NaiveDate> = BTreeMap::new();
    for fact in facts {
        if fact.reference_date.month() == rule.anchor_month {
            anchors
                .entry(fact.reference_date.year())
                .or_insert(fact.publication_date);
        }
    }

    let references: BTreeSet<NaiveDate> = facts.iter().map(|f| f.reference_date).collect();
    for reference_date in references {
        for rank in 1..=rule.horizons {
            let anchor_year = reference_date.year() + i32::from(rank);
            if let Some(&effective_date) = anchors.get(&anchor_year) {
                out.push(RevisionEvent {
                    publication,
                    reference_date,
                    revision_index: max_revision,
                    benchmark_rank: rank,
                    effective_date,
                });
            }
        }
    }
}

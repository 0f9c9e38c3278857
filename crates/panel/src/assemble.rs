//! Joining revision series with their revision events.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};
use vintage_grid::RevisionEvent;
use vintage_release::Publication;

use crate::error::PanelError;
use crate::row::{PanelRow, SeriesValues, render_key};

/// What to do with a value whose revision has no event in the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingVintage {
    /// Leave the value out of the panel.
    #[default]
    Drop,
    /// Keep the value with no effective date and no benchmark rank.
    Keep,
}

/// Options for [`assemble`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    missing_vintage: MissingVintage,
}

impl AssembleOptions {
    /// Creates default options (unmatched values dropped).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy for values without a matching event.
    pub fn with_missing_vintage(mut self, missing_vintage: MissingVintage) -> Self {
        self.missing_vintage = missing_vintage;
        self
    }

    /// Policy for values without a matching event.
    pub fn missing_vintage(&self) -> MissingVintage {
        self.missing_vintage
    }
}

type EventIndex<'a> = HashMap<(Publication, NaiveDate, u8), Vec<&'a RevisionEvent>>;

/// Left-joins revision series onto revision events.
///
/// Each point is matched on `(publication, release reference, revision
/// index)`, where the release reference is the date under which the
/// publication's calendar files the point's month (the quarter's last month
/// for quarterly publications). A point matching several events (an ordinary
/// revision and a benchmark at the same index) yields one row per event.
///
/// The result is sorted by [`PanelRow::key`].
///
/// # Errors
///
/// Returns [`PanelError::DuplicateKey`] if two rows share a key, which
/// happens when the event list or a series repeats an entry, or
/// [`PanelError::Release`] if a reference date cannot be mapped.
#[tracing::instrument(skip_all, fields(n_series = series.len(), n_events = events.len()))]
pub fn assemble(
    series: &[SeriesValues],
    events: &[RevisionEvent],
    options: &AssembleOptions,
) -> Result<Vec<PanelRow>, PanelError> {
    let mut index: EventIndex<'_> = HashMap::new();
    for event in events {
        index
            .entry((event.publication, event.reference_date, event.revision_index))
            .or_default()
            .push(event);
    }

    let mut rows = Vec::new();
    let mut n_unmatched = 0usize;
    for s in series {
        let publication = s.key.publication;
        for point in &s.points {
            let release_ref = publication.release_reference(point.reference_date)?;
            let matched = index.get(&(publication, release_ref, point.revision_index));
            match matched {
                Some(events) => {
                    rows.extend(events.iter().map(|e| PanelRow {
                        series: s.key.clone(),
                        reference_date: point.reference_date,
                        effective_date: Some(e.effective_date),
                        revision_index: point.revision_index,
                        benchmark_rank: Some(e.benchmark_rank),
                        value: point.value,
                    }));
                }
                None => {
                    n_unmatched += 1;
                    if options.missing_vintage == MissingVintage::Keep {
                        rows.push(PanelRow {
                            series: s.key.clone(),
                            reference_date: point.reference_date,
                            effective_date: None,
                            revision_index: point.revision_index,
                            benchmark_rank: None,
                            value: point.value,
                        });
                    }
                }
            }
        }
        debug!(series = %s.key, n_points = s.points.len(), "joined series");
    }

    check_unique(&rows)?;
    rows.sort_by(|a, b| a.key().cmp(&b.key()));

    info!(
        n_rows = rows.len(),
        n_unmatched,
        missing_vintage = ?options.missing_vintage,
        "assembled revision panel"
    );
    Ok(rows)
}

/// Verifies that no two rows share a [`PanelRow::key`].
///
/// # Errors
///
/// Returns [`PanelError::DuplicateKey`] naming the first repeated key in row
/// order.
pub fn check_unique(rows: &[PanelRow]) -> Result<(), PanelError> {
    let mut seen = BTreeSet::new();
    for row in rows {
        let key = row.key();
        if !seen.insert(key) {
            return Err(PanelError::DuplicateKey {
                key: render_key(key),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::SeriesKey;
    use vintage_triangle::RevisionPoint;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(p: Publication, r: NaiveDate, k: u8, rank: u8, eff: NaiveDate) -> RevisionEvent {
        RevisionEvent {
            publication: p,
            reference_date: r,
            revision_index: k,
            benchmark_rank: rank,
            effective_date: eff,
        }
    }

    fn ces_series(points: Vec<RevisionPoint>) -> SeriesValues {
        SeriesValues::new(SeriesKey::national(Publication::Ces, true), points)
    }

    #[test]
    fn one_row_per_matching_event() {
        let june = ymd(2023, 6, 12);
        let events = [
            event(Publication::Ces, june, 0, 0, ymd(2023, 7, 7)),
            event(Publication::Ces, june, 2, 0, ymd(2023, 9, 7)),
            event(Publication::Ces, june, 2, 1, ymd(2024, 2, 2)),
        ];
        let series = [ces_series(vec![
            RevisionPoint::new(june, 0, 100.0),
            RevisionPoint::new(june, 2, 102.0),
        ])];
        let rows = assemble(&series, &events, &AssembleOptions::new()).unwrap();
        let got: Vec<(u8, Option<u8>, Option<NaiveDate>)> = rows
            .iter()
            .map(|r| (r.revision_index, r.benchmark_rank, r.effective_date))
            .collect();
        assert_eq!(
            got,
            vec![
                (0, Some(0), Some(ymd(2023, 7, 7))),
                (2, Some(0), Some(ymd(2023, 9, 7))),
                (2, Some(1), Some(ymd(2024, 2, 2))),
            ]
        );
    }

    #[test]
    fn unmatched_dropped_by_default() {
        let series = [ces_series(vec![RevisionPoint::new(ymd(2023, 6, 12), 1, 1.0)])];
        let rows = assemble(&series, &[], &AssembleOptions::new()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn unmatched_kept_with_nulls() {
        let series = [ces_series(vec![RevisionPoint::new(ymd(2023, 6, 12), 1, 1.0)])];
        let options = AssembleOptions::new().with_missing_vintage(MissingVintage::Keep);
        let rows = assemble(&series, &[], &options).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].effective_date, None);
        assert_eq!(rows[0].benchmark_rank, None);
    }

    #[test]
    fn quarterly_months_join_on_quarter_end() {
        let march = ymd(2023, 3, 12);
        let events = [event(Publication::Qcew, march, 1, 0, ymd(2023, 9, 6))];
        let series = [SeriesValues::new(
            SeriesKey::national(Publication::Qcew, false),
            vec![
                RevisionPoint::new(ymd(2023, 1, 12), 1, 1.0),
                RevisionPoint::new(ymd(2023, 2, 12), 1, 2.0),
                RevisionPoint::new(march, 1, 3.0),
                RevisionPoint::new(ymd(2023, 4, 12), 1, 4.0),
            ],
        )];
        let rows = assemble(&series, &events, &AssembleOptions::new()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.effective_date == Some(ymd(2023, 9, 6))));
    }

    #[test]
    fn duplicated_event_aborts() {
        let june = ymd(2023, 6, 12);
        let e = event(Publication::Ces, june, 0, 0, ymd(2023, 7, 7));
        let series = [ces_series(vec![RevisionPoint::new(june, 0, 1.0)])];
        let err = assemble(&series, &[e, e], &AssembleOptions::new()).unwrap_err();
        assert!(matches!(err, PanelError::DuplicateKey { .. }));
    }

    #[test]
    fn check_unique_names_first_duplicate() {
        let row = PanelRow {
            series: SeriesKey::national(Publication::Sae, false),
            reference_date: ymd(2022, 1, 12),
            effective_date: Some(ymd(2022, 3, 11)),
            revision_index: 0,
            benchmark_rank: Some(0),
            value: 5.0,
        };
        let err = check_unique(&[row.clone(), row]).unwrap_err();
        assert_eq!(
            err,
            PanelError::DuplicateKey {
                key: "sae/nsa/national/00/national/00 ref=2022-01-12 effective=2022-03-11 \
                      revision=0 benchmark=0"
                    .to_string()
            }
        );
    }
}

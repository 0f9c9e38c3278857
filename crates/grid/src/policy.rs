//! Per-publication revision policies.

use std::collections::BTreeMap;

use vintage_release::Publication;

use crate::error::GridError;

/// Out-of-cycle benchmark schedule for a monthly policy.
///
/// A reference period in year `Y` is benchmarked once for each `h` in
/// `1..=horizons`, dated by the publication of the `anchor_month` reference
/// period of year `Y + h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkRule {
    /// Reference month whose publication carries the benchmark (1..=12).
    pub anchor_month: u32,
    /// Number of successive years that benchmark each reference period.
    pub horizons: u8,
}

/// How many times, and when, a publication revises a reference period.
///
/// One variant per series class. Ordinary revision `k` is dated
/// `k * months_per_revision()` months after first publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionPolicy {
    /// Monthly releases with ordinary revisions `0..=max_revision`, and one
    /// benchmark carried by the `anchor_month` release of the following year.
    AnnualBenchmark {
        /// Highest ordinary revision index.
        max_revision: u8,
        /// Reference month whose publication carries the benchmark.
        anchor_month: u32,
    },

    /// Monthly releases with ordinary revisions `0..=max_revision`, and
    /// benchmarks carried by the `anchor_month` release of each of the next
    /// `horizons` years.
    RollingBenchmark {
        /// Highest ordinary revision index.
        max_revision: u8,
        /// Reference month whose publication carries each benchmark.
        anchor_month: u32,
        /// Number of successive annual benchmarks.
        horizons: u8,
    },

    /// Quarterly releases. A first-quarter period is revised
    /// `first_quarter_max` times; each later quarter one time fewer, since
    /// fewer editions remain in the year to restate it.
    Quarterly {
        /// Highest revision index for reference periods in Q1.
        first_quarter_max: u8,
    },
}

impl RevisionPolicy {
    /// National payrolls: revisions 0, 1, 2 and a benchmark with the
    /// following January's release.
    pub fn ces() -> Self {
        Self::AnnualBenchmark {
            max_revision: 2,
            anchor_month: 1,
        }
    }

    /// State payrolls: revisions 0, 1 and benchmarks with the March release
    /// one and two years later.
    pub fn sae() -> Self {
        Self::RollingBenchmark {
            max_revision: 1,
            anchor_month: 3,
            horizons: 2,
        }
    }

    /// Quarterly census: Q1 → 0..=4, Q2 → 0..=3, Q3 → 0..=2, Q4 → 0..=1.
    pub fn qcew() -> Self {
        Self::Quarterly {
            first_quarter_max: 4,
        }
    }

    /// Built-in policy for a publication.
    pub fn for_publication(publication: Publication) -> Self {
        match publication {
            Publication::Ces => Self::ces(),
            Publication::Sae => Self::sae(),
            Publication::Qcew => Self::qcew(),
        }
    }

    /// Highest ordinary revision index for a reference period in
    /// `reference_month`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Calendar`] if `reference_month` is outside 1..=12.
    pub fn max_revision(&self, reference_month: u32) -> Result<u8, GridError> {
        match *self {
            Self::AnnualBenchmark { max_revision, .. }
            | Self::RollingBenchmark { max_revision, .. } => Ok(max_revision),
            Self::Quarterly { first_quarter_max } => {
                let q = vintage_calendar::quarter(reference_month)?;
                // q is 1..=4, so the cast cannot truncate.
                Ok(first_quarter_max.saturating_sub(q as u8 - 1))
            }
        }
    }

    /// Calendar months between consecutive ordinary revisions.
    pub fn months_per_revision(&self) -> u32 {
        match self {
            Self::AnnualBenchmark { .. } | Self::RollingBenchmark { .. } => 1,
            Self::Quarterly { .. } => 3,
        }
    }

    /// Benchmark schedule, if the policy has one.
    pub fn benchmark(&self) -> Option<BenchmarkRule> {
        match *self {
            Self::AnnualBenchmark { anchor_month, .. } => Some(BenchmarkRule {
                anchor_month,
                horizons: 1,
            }),
            Self::RollingBenchmark {
                anchor_month,
                horizons,
                ..
            } => Some(BenchmarkRule {
                anchor_month,
                horizons,
            }),
            Self::Quarterly { .. } => None,
        }
    }

    /// Validates policy parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPolicy`] if the anchor month is outside
    /// 1..=12 or a rolling benchmark has zero horizons.
    pub fn validate(&self, publication: Publication) -> Result<(), GridError> {
        let invalid = |reason: String| GridError::InvalidPolicy {
            publication,
            reason,
        };
        if let Some(rule) = self.benchmark() {
            if !(1..=12).contains(&rule.anchor_month) {
                return Err(invalid(format!(
                    "anchor_month must be 1..=12, got {}",
                    rule.anchor_month
                )));
            }
            if rule.horizons == 0 {
                return Err(invalid("horizons must be >= 1".to_string()));
            }
        }
        Ok(())
    }
}

/// Revision policy for each publication.
///
/// The default table holds the built-in policy of every [`Publication`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: BTreeMap<Publication, RevisionPolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            policies: Publication::ALL
                .into_iter()
                .map(|p| (p, RevisionPolicy::for_publication(p)))
                .collect(),
        }
    }
}

impl PolicyTable {
    /// Creates a table with no policies.
    pub fn empty() -> Self {
        Self {
            policies: BTreeMap::new(),
        }
    }

    /// Sets (or replaces) the policy for a publication.
    pub fn with_policy(mut self, publication: Publication, policy: RevisionPolicy) -> Self {
        self.policies.insert(publication, policy);
        self
    }

    /// Returns the policy for a publication.
    pub fn get(&self, publication: Publication) -> Option<&RevisionPolicy> {
        self.policies.get(&publication)
    }

    /// Iterates over `(publication, policy)` pairs in publication order.
    pub fn iter(&self) -> impl Iterator<Item = (Publication, &RevisionPolicy)> {
        self.policies.iter().map(|(p, policy)| (*p, policy))
    }

    /// Validates every policy in the table.
    ///
    /// # Errors
    ///
    /// Returns the first [`GridError::InvalidPolicy`] encountered.
    pub fn validate(&self) -> Result<(), GridError> {
        self.iter().try_for_each(|(p, policy)| policy.validate(p))
    }
}

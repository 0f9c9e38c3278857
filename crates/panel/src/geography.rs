//! Geographic levels and the state-to-region/division lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// Geographic level of a panel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeographicType {
    /// Whole country; passes through aggregation untouched.
    National,
    /// One state, keyed by FIPS code.
    State,
    /// Census region, summed from states.
    Region,
    /// Census division, summed from states.
    Division,
}

impl GeographicType {
    /// All levels, in sort order.
    pub const ALL: [GeographicType; 4] = [
        GeographicType::National,
        GeographicType::State,
        GeographicType::Region,
        GeographicType::Division,
    ];

    /// Lowercase name used in output files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "national",
            Self::State => "state",
            Self::Region => "region",
            Self::Division => "division",
        }
    }
}

impl fmt::Display for GeographicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeographicType {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PanelError::UnknownGeographicType {
                name: s.to_string(),
            })
    }
}

/// Region and division codes of one state; `None` where the lookup is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Parents {
    region: Option<String>,
    division: Option<String>,
}

/// Maps state FIPS codes to their region and division codes.
///
/// Blank codes are stored as absent, so a state with no region is left out
/// of region sums and reported as unmapped at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeographyMap {
    states: BTreeMap<String, Parents>,
}

fn non_blank(code: String) -> Option<String> {
    let trimmed = code.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl GeographyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state's region and division, replacing any earlier entry.
    pub fn with_state(
        mut self,
        state_fips: impl Into<String>,
        region: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        self.insert(state_fips, region, division);
        self
    }

    /// Adds a state's region and division, replacing any earlier entry.
    /// Empty or all-whitespace codes mean the state has no parent at that
    /// level.
    pub fn insert(
        &mut self,
        state_fips: impl Into<String>,
        region: impl Into<String>,
        division: impl Into<String>,
    ) {
        self.states.insert(
            state_fips.into(),
            Parents {
                region: non_blank(region.into()),
                division: non_blank(division.into()),
            },
        );
    }

    /// Code of the aggregate `level` containing `state_fips`.
    ///
    /// Only [`GeographicType::Region`] and [`GeographicType::Division`] are
    /// aggregate levels; other levels return `None`.
    pub fn parent(&self, state_fips: &str, level: GeographicType) -> Option<&str> {
        let parents = self.states.get(state_fips)?;
        let code = match level {
            GeographicType::Region => &parents.region,
            GeographicType::Division => &parents.division,
            GeographicType::National | GeographicType::State => return None,
        };
        code.as_deref()
    }

    /// Number of states in the lookup, including those with blank codes.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state is listed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

//! The closed set of published series.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use vintage_calendar::{quarter, quarter_end_month, reference_date};

use crate::error::ReleaseError;

/// Release cadence of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One release per reference month.
    Monthly,
    /// One release per reference quarter.
    Quarterly,
}

/// A statistical publication whose releases are tracked.
///
/// Ordering follows declaration order and is used to sort every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Publication {
    /// Current Employment Statistics: national payrolls.
    Ces,
    /// State and Area Employment: state-level payrolls.
    Sae,
    /// Quarterly Census of Employment and Wages.
    Qcew,
}

impl Publication {
    /// All publications, in sort order.
    pub const ALL: [Publication; 3] = [Publication::Ces, Publication::Sae, Publication::Qcew];

    /// Short lowercase identifier used in files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ces => "ces",
            Self::Sae => "sae",
            Self::Qcew => "qcew",
        }
    }

    /// Release cadence.
    pub fn frequency(self) -> Frequency {
        match self {
            Self::Ces | Self::Sae => Frequency::Monthly,
            Self::Qcew => Frequency::Quarterly,
        }
    }

    /// Reference date under which this publication's release calendar files
    /// the month containing `date`.
    ///
    /// Monthly publications release every month on its own; quarterly
    /// publications release all three months of a quarter together, filed
    /// under the quarter's last month.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Calendar`] if the year is outside chrono's
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use vintage_release::Publication;
    ///
    /// let feb = NaiveDate::from_ymd_opt(2023, 2, 12).unwrap();
    /// let key = Publication::Qcew.release_reference(feb).unwrap();
    /// assert_eq!(key.to_string(), "2023-03-12");
    /// ```
    pub fn release_reference(self, date: NaiveDate) -> Result<NaiveDate, ReleaseError> {
        let month = match self.frequency() {
            Frequency::Monthly => date.month(),
            Frequency::Quarterly => quarter_end_month(quarter(date.month())?)?,
        };
        Ok(reference_date(date.year(), month)?)
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Publication {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ReleaseError::UnknownPublication {
                name: s.to_string(),
            })
    }
}

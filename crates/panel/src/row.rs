//! Series identity and panel rows.

use std::fmt;

use chrono::NaiveDate;
use vintage_release::Publication;
use vintage_triangle::RevisionPoint;

use crate::geography::GeographicType;

/// Identity of one revision series: everything in a panel key except the
/// reference period and vintage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    /// Publication the values come from.
    pub publication: Publication,
    /// Whether values are seasonally adjusted.
    pub seasonally_adjusted: bool,
    /// Geographic level.
    pub geographic_type: GeographicType,
    /// Code within the level (`"00"` for national, FIPS for states).
    pub geographic_code: String,
    /// Industry classification level.
    pub industry_type: String,
    /// Code within the industry level.
    pub industry_code: String,
}

impl SeriesKey {
    /// National, all-industry series of a publication.
    pub fn national(publication: Publication, seasonally_adjusted: bool) -> Self {
        Self {
            publication,
            seasonally_adjusted,
            geographic_type: GeographicType::National,
            geographic_code: "00".to_string(),
            industry_type: "national".to_string(),
            industry_code: "00".to_string(),
        }
    }

    /// Replaces the geography.
    pub fn with_geography(
        mut self,
        geographic_type: GeographicType,
        geographic_code: impl Into<String>,
    ) -> Self {
        self.geographic_type = geographic_type;
        self.geographic_code = geographic_code.into();
        self
    }

    /// Replaces the industry.
    pub fn with_industry(
        mut self,
        industry_type: impl Into<String>,
        industry_code: impl Into<String>,
    ) -> Self {
        self.industry_type = industry_type.into();
        self.industry_code = industry_code.into();
        self
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}",
            self.publication,
            if self.seasonally_adjusted { "sa" } else { "nsa" },
            self.geographic_type,
            self.geographic_code,
            self.industry_type,
            self.industry_code
        )
    }
}

/// Revision points of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValues {
    /// Series identity.
    pub key: SeriesKey,
    /// Values by reference period and revision.
    pub points: Vec<RevisionPoint>,
}

impl SeriesValues {
    /// Creates a series.
    pub fn new(key: SeriesKey, points: Vec<RevisionPoint>) -> Self {
        Self { key, points }
    }
}

/// Full panel key: `(series, reference_date, effective_date, revision_index,
/// benchmark_rank)`.
pub type PanelKey<'a> = (&'a SeriesKey, NaiveDate, Option<NaiveDate>, u8, Option<u8>);

/// One value of one series as of one revision event.
///
/// `effective_date` and `benchmark_rank` are `None` only for values kept
/// without a matching revision event.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    /// Series identity.
    pub series: SeriesKey,
    /// Reference period.
    pub reference_date: NaiveDate,
    /// Date the value became public.
    pub effective_date: Option<NaiveDate>,
    /// Ordinary revision index.
    pub revision_index: u8,
    /// Benchmark rank, 0 for ordinary revisions.
    pub benchmark_rank: Option<u8>,
    /// Value.
    pub value: f64,
}

impl PanelRow {
    /// Key that must be unique across the panel; also the sort order.
    pub fn key(&self) -> PanelKey<'_> {
        (
            &self.series,
            self.reference_date,
            self.effective_date,
            self.revision_index,
            self.benchmark_rank,
        )
    }
}

/// Renders a panel key for error messages.
pub(crate) fn render_key(key: PanelKey<'_>) -> String {
    let (series, reference_date, effective_date, revision_index, benchmark_rank) = key;
    let effective = effective_date.map_or_else(|| "null".to_string(), |d| d.to_string());
    let benchmark = benchmark_rank.map_or_else(|| "null".to_string(), |b| b.to_string());
    format!(
        "{series} ref={reference_date} effective={effective} revision={revision_index} benchmark={benchmark}"
    )
}

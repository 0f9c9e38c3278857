//! Error types for vintage-release.

/// Error type for all fallible operations in the vintage-release crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReleaseError {
    /// Returned when a publication name is not one of the known series.
    #[error("unknown publication: {name:?} (expected one of ces, sae, qcew)")]
    UnknownPublication {
        /// The name as it appeared in the input.
        name: String,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] vintage_calendar::CalendarError),
}

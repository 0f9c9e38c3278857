//! Error types for the vintage-grid crate.

use vintage_release::Publication;

/// Error type for all fallible operations in the vintage-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when a fact's publication has no revision policy.
    #[error("no revision policy configured for publication {publication}")]
    MissingPolicy {
        /// Publication without a policy.
        publication: Publication,
    },

    /// Returned when a revision policy has out-of-range parameters.
    #[error("invalid revision policy for {publication}: {reason}")]
    InvalidPolicy {
        /// Publication whose policy is invalid.
        publication: Publication,
        /// Description of the problem.
        reason: String,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] vintage_calendar::CalendarError),
}

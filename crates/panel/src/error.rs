//! Error types for the vintage-panel crate.

/// Error type for all fallible operations in the vintage-panel crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    /// Returned when two panel rows share the full key tuple.
    #[error("duplicate panel key: {key}")]
    DuplicateKey {
        /// Rendered key of the first duplicate found.
        key: String,
    },

    /// Returned when a geography type name is not recognized.
    #[error("unknown geographic type: {name:?}")]
    UnknownGeographicType {
        /// The unrecognized name.
        name: String,
    },

    /// Release calendar error.
    #[error(transparent)]
    Release(#[from] vintage_release::ReleaseError),
}

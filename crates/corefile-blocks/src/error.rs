//! Error types for corefile-blocks

/// Result type for corefile-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating a merge vocabulary.
///
/// Merging itself never fails; only a vocabulary that cannot delimit a
/// region unambiguously is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Vocabulary field `{field}` must not be empty")]
    EmptyLiteral { field: &'static str },

    #[error("Vocabulary field `{field}` must be a single line")]
    MultiLineLiteral { field: &'static str },

    #[error("Begin and end markers overlap: {begin:?} / {end:?}")]
    OverlappingMarkers { begin: String, end: String },
}

//! Error types for corefile-sync

use std::path::PathBuf;

/// Result type for corefile-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors at the boundary with the external document store.
///
/// None of these is fatal: a later reconcile cycle may succeed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document or entity list does not exist yet
    #[error("Not found: {0}")]
    NotFound(String),

    /// A concurrent writer changed the document since it was fetched
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// The store is temporarily unavailable
    #[error("Transient store error: {0}")]
    Transient(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error(transparent)]
    Meta(#[from] corefile_meta::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether re-running the cycle may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Transient(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_and_transient_are_retryable() {
        assert!(Error::Conflict("x".into()).is_retryable());
        assert!(Error::Transient("x".into()).is_retryable());
        assert!(!Error::NotFound("x".into()).is_retryable());
        assert!(!Error::RetriesExhausted { attempts: 1, last: "x".into() }.is_retryable());
    }
}

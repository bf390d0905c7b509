//! Error types for corefile-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from corefile-blocks
    #[error(transparent)]
    Blocks(#[from] corefile_blocks::Error),

    /// Error from corefile-meta
    #[error(transparent)]
    Meta(#[from] corefile_meta::Error),

    /// Error from corefile-sync
    #[error(transparent)]
    Sync(#[from] corefile_sync::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

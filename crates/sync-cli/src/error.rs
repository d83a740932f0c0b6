//! Error types for sync-cli
//!
//! Failures of the sync run itself arrive as `RunOutcome::FatalError`;
//! these cover the front end around it.

use crate::exit;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report could not be encoded
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Json(_) => exit::IO,
        }
    }
}

//! Error types for sync-fs

use std::path::PathBuf;

/// Result type for sync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid repository-relative path '{path}': {reason}")]
    InvalidRelativePath { path: String, reason: String },

    #[error("Path {path} resolves outside of {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRelativePath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn empty_path(path: &str) -> Self {
        Self::invalid(path, "path is empty")
    }

    pub(crate) fn absolute_path(path: &str) -> Self {
        Self::invalid(path, "path must be relative to the repository root")
    }

    pub(crate) fn traversal(path: &str) -> Self {
        Self::invalid(path, "'..' segments are not allowed")
    }
}

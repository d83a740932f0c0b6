//! Error types for sync-git

/// Result type for sync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while materializing a source repository
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch source repository {repo} at ref {reference}: {message}")]
    SourceFetch {
        repo: String,
        reference: String,
        message: String,
    },

    #[error("Could not run git: {source}")]
    GitUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted while fetching {repo}")]
    Interrupted { repo: String },

    #[error("Failed to create temporary directory: {source}")]
    TempDir {
        #[source]
        source: std::io::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] sync_fs::Error),
}

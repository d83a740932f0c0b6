//! Error types for sync-core

use std::path::PathBuf;

/// Result type for sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a run before a per-file verdict can be reached
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The configuration file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a valid document
    #[error("Failed to parse {}{}: {message}", .path.display(), location(.line, .column))]
    ConfigParse {
        path: PathBuf,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// The document parsed but a field is missing or wrong
    #[error("Invalid configuration in {}: {field}: {message}", .path.display())]
    ConfigValidation {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// Unrecognized mode literal
    #[error("Invalid mode: {mode} (expected \"check\" or \"write\")")]
    InvalidMode { mode: String },

    /// The run was interrupted before it finished
    #[error("Interrupted")]
    Interrupted,

    /// Source materialization failed
    #[error(transparent)]
    Fetch(#[from] sync_git::Error),
}

/// Broad failure category, used to pick exit codes and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigNotFound,
    ConfigParse,
    ConfigValidation,
    SourceFetch,
    Interrupted,
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            Self::ConfigParse { .. } => ErrorKind::ConfigParse,
            Self::ConfigRead { .. } => ErrorKind::Io,
            Self::ConfigValidation { .. } | Self::InvalidMode { .. } => {
                ErrorKind::ConfigValidation
            }
            Self::Interrupted => ErrorKind::Interrupted,
            Self::Fetch(inner) => match inner {
                sync_git::Error::Interrupted { .. } => ErrorKind::Interrupted,
                sync_git::Error::TempDir { .. } | sync_git::Error::Fs(_) => ErrorKind::Io,
                _ => ErrorKind::SourceFetch,
            },
        }
    }
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

//! Well-known file and directory names.

use std::path::Path;

/// Fixed names the sync engine looks for or creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPath {
    /// The opt-in configuration file in a consumer repository
    ConfigFile,
    /// The `.git` entry marking a repository boundary
    GitDir,
    /// Checkout directory inside a materialized source's temp dir
    SourceCheckout,
}

impl SyncPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigFile => ".sync-files.toml",
            Self::GitDir => ".git",
            Self::SourceCheckout => "source",
        }
    }
}

impl AsRef<Path> for SyncPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SyncPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SyncPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Upward search for the opt-in configuration file

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use sync_fs::SyncPath;

use super::manifest::SyncConfig;
use crate::{Error, Result};

/// A configuration file that was found and validated.
#[derive(Debug, Clone)]
pub struct DiscoveredConfig {
    /// Location of the configuration file
    pub path: PathBuf,
    /// Consumer root: the directory containing the configuration file.
    /// Every `dst` resolves against it.
    pub root: PathBuf,
    /// The validated configuration
    pub config: SyncConfig,
}

/// Locates `.sync-files.toml` starting from an explicit directory.
///
/// The search checks the start directory and then each ancestor. A
/// directory containing `.git` is the last one searched, so discovery never
/// leaves the enclosing repository.
pub struct ConfigResolver {
    start: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver that searches from `start`.
    ///
    /// A relative `start` is made absolute against the current directory,
    /// and `..` components are resolved before the search walks upward.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let start = start.into();
        let start = match dunce::canonicalize(&start) {
            Ok(canonical) => canonical,
            Err(_) => lexical_normalize(&std::path::absolute(&start).unwrap_or(start)),
        };
        Self { start }
    }

    /// The directory the search starts from.
    pub fn start(&self) -> &Path {
        &self.start
    }

    /// Find the configuration file without reading it.
    pub fn discover(&self) -> Option<PathBuf> {
        for dir in self.start.ancestors() {
            let candidate = dir.join(SyncPath::ConfigFile);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Found configuration");
                return Some(candidate);
            }
            if dir.join(SyncPath::GitDir).exists() {
                tracing::debug!(
                    boundary = %dir.display(),
                    "Reached repository boundary without finding configuration"
                );
                return None;
            }
        }
        tracing::debug!(start = %self.start.display(), "No configuration up to filesystem root");
        None
    }

    /// Find, parse and validate the configuration.
    ///
    /// Returns `Ok(None)` when no configuration exists: the repository has
    /// not opted in, which is not an error.
    pub fn resolve(&self) -> Result<Option<DiscoveredConfig>> {
        match self.discover() {
            Some(path) => Self::load(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Parse and validate a configuration file at a known location.
    ///
    /// Unlike [`ConfigResolver::resolve`], a missing file is an error here.
    pub fn load(path: &Path) -> Result<DiscoveredConfig> {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path });
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::ConfigParse {
                    path,
                    line: None,
                    column: None,
                    message: "file is not valid UTF-8".to_string(),
                });
            }
            Err(source) => return Err(Error::ConfigRead { path, source }),
        };

        let config = SyncConfig::parse(&content, &path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(
            path = %path.display(),
            repo = config.source_repo(),
            reference = config.source_ref(),
            files = config.file_pairs().len(),
            mode = %config.default_mode(),
            "Loaded configuration"
        );

        Ok(DiscoveredConfig { path, root, config })
    }
}

/// Fold `.` and `..` without touching the filesystem, for start
/// directories that do not exist.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_start_has_parent_components_folded() {
        let tmp = tempfile::TempDir::new().unwrap();
        let start = tmp.path().join("a").join("..").join("missing").join(".");

        let resolver = ConfigResolver::new(&start);

        assert!(resolver.start().ends_with("missing"));
        assert!(
            !resolver
                .start()
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::CurDir))
        );
    }
}

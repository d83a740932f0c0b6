//! Repository-relative paths and root containment

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// A validated, slash separated path relative to a repository root.
///
/// Configuration paths are always slash separated regardless of the host
/// convention. They are converted to platform-native form only when
/// resolved under a real root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Parse a repository-relative path from configuration.
    ///
    /// Backslashes become slashes and `.` or empty segments are dropped.
    /// Empty paths, absolute paths and any `..` segment are errors.
    pub fn relative(raw: &str) -> Result<Self> {
        let slashed = raw.replace('\\', "/");
        if slashed.trim().is_empty() {
            return Err(Error::empty_path(raw));
        }
        if slashed.starts_with('/') || has_drive_prefix(&slashed) {
            return Err(Error::absolute_path(raw));
        }

        let mut segments = Vec::new();
        for segment in slashed.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(Error::traversal(raw)),
                other => segments.push(other),
            }
        }
        if segments.is_empty() {
            return Err(Error::empty_path(raw));
        }

        Ok(Self {
            inner: segments.join("/"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Resolve this path beneath `root`, one native component per segment.
    pub fn resolve_under(&self, root: &Path) -> PathBuf {
        self.segments()
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }

    /// Iterate over the slash separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/')
    }
}

/// Verify that `candidate` stays inside `root` once symlinks are resolved.
///
/// `candidate` need not exist: its nearest existing ancestor is resolved
/// instead, which catches writes through a symlinked directory.
pub fn ensure_within(root: &Path, candidate: &Path) -> Result<()> {
    let canonical_root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;

    let mut probe = candidate;
    while probe.symlink_metadata().is_err() {
        match probe.parent() {
            Some(parent) => probe = parent,
            None => return Ok(()),
        }
    }

    let resolved = dunce::canonicalize(probe).map_err(|e| Error::io(probe, e))?;
    if resolved.starts_with(&canonical_root) {
        Ok(())
    } else {
        tracing::debug!(
            path = %candidate.display(),
            resolved = %resolved.display(),
            root = %canonical_root.display(),
            "Path escapes its root"
        );
        Err(Error::OutsideRoot {
            path: candidate.to_path_buf(),
            root: root.to_path_buf(),
        })
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_strips_current_dir_segments() {
        let path = NormalizedPath::relative("./docs//guide.md").unwrap();
        assert_eq!(path.as_str(), "docs/guide.md");
    }

    #[test]
    fn relative_rejects_drive_prefix() {
        assert!(NormalizedPath::relative("C:/Windows/win.ini").is_err());
    }

    #[test]
    fn segments_of_nested_path() {
        let path = NormalizedPath::relative("a/b/c.txt").unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c.txt"]);
    }
}

//! Source fetcher capability and the materialized checkout it produces

use std::path::{Path, PathBuf};

use sync_fs::{NormalizedPath, ensure_within, io};
use tempfile::TempDir;

use crate::Result;

/// Capability that materializes a source repository at a ref.
///
/// Implementations decide how content is retrieved (git subprocess, a
/// native library, a plain directory copy in tests). Comparison and
/// enforcement only ever see the resulting [`MaterializedSource`].
pub trait SourceFetcher {
    /// Produce a private checkout of `repo` at `reference`.
    fn fetch(&self, repo: &str, reference: &str) -> Result<MaterializedSource>;
}

/// An exclusively owned, temporary snapshot of the source repository.
///
/// The backing temporary directory is removed by [`MaterializedSource::close`]
/// or, failing that, when the value is dropped.
#[derive(Debug)]
pub struct MaterializedSource {
    temp: TempDir,
    root: PathBuf,
    repo: String,
    reference: String,
    commit: Option<String>,
}

impl MaterializedSource {
    /// Wrap a populated checkout.
    ///
    /// `root` is the checkout directory and must live inside `temp`, which
    /// is owned from here on.
    pub fn new(
        temp: TempDir,
        root: PathBuf,
        repo: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            temp,
            root,
            repo: repo.into(),
            reference: reference.into(),
            commit: None,
        }
    }

    /// Record the commit id the checkout resolved to.
    pub fn with_commit(mut self, commit: Option<String>) -> Self {
        self.commit = commit;
        self
    }

    /// Checkout directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repository location the snapshot was taken from.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Ref the snapshot was requested at.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Commit id checked out, when it could be determined.
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    /// Native path of a repository-relative file inside the checkout.
    pub fn resolve(&self, path: &NormalizedPath) -> PathBuf {
        path.resolve_under(&self.root)
    }

    /// Read a file's exact bytes, or `None` if it does not exist.
    ///
    /// A symlink pointing outside the checkout is an error rather than a
    /// read of whatever it targets.
    pub fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        let native = self.resolve(path);
        let Some(content) = io::read_optional(&native)? else {
            return Ok(None);
        };
        ensure_within(&self.root, &native)?;
        Ok(Some(content))
    }

    /// Remove the temporary directory now, reporting any failure.
    pub fn close(self) -> Result<()> {
        let path = self.temp.path().to_path_buf();
        self.temp
            .close()
            .map_err(|e| sync_fs::Error::io(path, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source_with(files: &[(&str, &str)]) -> MaterializedSource {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("source");
        for (path, content) in files {
            let full = root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        MaterializedSource::new(temp, root, "origin", "main")
    }

    #[test]
    fn read_existing_file() {
        let source = source_with(&[("dir/a.txt", "hello\n")]);
        let path = NormalizedPath::relative("dir/a.txt").unwrap();
        assert_eq!(source.read(&path).unwrap(), Some(b"hello\n".to_vec()));
    }

    #[test]
    fn read_missing_file_is_none() {
        let source = source_with(&[]);
        let path = NormalizedPath::relative("absent.txt").unwrap();
        assert_eq!(source.read(&path).unwrap(), None);
    }

    #[test]
    fn close_removes_temp_dir() {
        let source = source_with(&[("a.txt", "a")]);
        let root = source.root().to_path_buf();
        assert!(root.exists());

        source.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn drop_removes_temp_dir() {
        let source = source_with(&[("a.txt", "a")]);
        let root = source.root().to_path_buf();
        drop(source);
        assert!(!root.exists());
    }
}

//! Source fetcher backed by the `git` executable
//!
//! Branches and tags take a single shallow, single-branch clone. Anything
//! else (typically a commit id) falls back to a shallow clone of all refs
//! followed by a targeted fetch and a detached checkout.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use sync_fs::SyncPath;

use crate::command::{GitFailure, run_git};
use crate::{Error, InterruptFlag, MaterializedSource, Result, SourceFetcher};

/// Materializes sources by spawning `git`.
#[derive(Debug, Clone, Default)]
pub struct GitCliFetcher {
    interrupt: InterruptFlag,
    temp_root: Option<PathBuf>,
}

impl GitCliFetcher {
    /// Create a fetcher that uses the system temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort running git processes when `interrupt` is raised.
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Create temporary checkouts under `dir` instead of the system default.
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    fn temp_dir(&self) -> Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("sync-files-");
        let created = match &self.temp_root {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        };
        created.map_err(|source| Error::TempDir { source })
    }

    /// `git clone --depth 1 --branch <ref>`: works for branch and tag names.
    fn clone_single_ref(
        &self,
        repo: &str,
        reference: &str,
        dest: &Path,
    ) -> std::result::Result<(), GitFailure> {
        run_git(
            [
                OsStr::new("clone"),
                OsStr::new("--depth"),
                OsStr::new("1"),
                OsStr::new("--branch"),
                OsStr::new(reference),
                OsStr::new("--"),
                OsStr::new(repo),
                dest.as_os_str(),
            ],
            None,
            &self.interrupt,
        )
    }

    /// Shallow clone of every ref, then fetch and check out `reference`.
    fn clone_and_checkout(
        &self,
        repo: &str,
        reference: &str,
        dest: &Path,
    ) -> std::result::Result<(), GitFailure> {
        run_git(
            [
                OsStr::new("clone"),
                OsStr::new("--depth"),
                OsStr::new("1"),
                OsStr::new("--no-single-branch"),
                OsStr::new("--"),
                OsStr::new(repo),
                dest.as_os_str(),
            ],
            None,
            &self.interrupt,
        )?;

        if let Err(fetch_err) = run_git(
            ["fetch", "--depth", "1", "origin", reference],
            Some(dest),
            &self.interrupt,
        ) {
            if fetch_err.is_terminal() {
                return Err(fetch_err);
            }
            // The clone may already hold the ref, e.g. an abbreviated tip id
            tracing::debug!(reference, error = %fetch_err, "Targeted fetch failed, trying local checkout");
            return run_git(
                ["checkout", "--detach", reference],
                Some(dest),
                &self.interrupt,
            )
            .map_err(|checkout_err| {
                if checkout_err.is_terminal() {
                    checkout_err
                } else {
                    fetch_err
                }
            });
        }

        run_git(
            ["checkout", "--detach", "FETCH_HEAD"],
            Some(dest),
            &self.interrupt,
        )
    }
}

impl SourceFetcher for GitCliFetcher {
    fn fetch(&self, repo: &str, reference: &str) -> Result<MaterializedSource> {
        if reference.starts_with('-') {
            return Err(Error::SourceFetch {
                repo: repo.to_string(),
                reference: reference.to_string(),
                message: "ref must not start with '-'".to_string(),
            });
        }

        let temp = self.temp_dir()?;
        let checkout = temp.path().join(SyncPath::SourceCheckout);
        tracing::debug!(repo, reference, dir = %checkout.display(), "Fetching source repository");

        if let Err(first) = self.clone_single_ref(repo, reference, &checkout) {
            if first.is_terminal() {
                return Err(into_error(first, repo, reference));
            }
            tracing::debug!(
                reference,
                error = %first,
                "Single-ref clone failed, falling back to full ref set"
            );
            remove_partial(&checkout)?;

            if let Err(second) = self.clone_and_checkout(repo, reference, &checkout) {
                if second.is_terminal() {
                    return Err(into_error(second, repo, reference));
                }
                return Err(Error::SourceFetch {
                    repo: repo.to_string(),
                    reference: reference.to_string(),
                    message: format!("{}; fallback: {}", first, second),
                });
            }
        }

        let commit = match head_commit(&checkout) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve checked out commit");
                None
            }
        };
        tracing::debug!(repo, reference, commit = ?commit, "Source materialized");

        Ok(MaterializedSource::new(temp, checkout, repo, reference).with_commit(commit))
    }
}

/// Commit id that HEAD of the repository at `path` points to.
pub fn head_commit(path: &Path) -> Result<String> {
    let repo = git2::Repository::open(path)?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// Clear whatever a failed clone left behind.
fn remove_partial(checkout: &Path) -> Result<()> {
    if checkout.exists() {
        fs::remove_dir_all(checkout).map_err(|e| sync_fs::Error::io(checkout, e))?;
    }
    Ok(())
}

fn into_error(failure: GitFailure, repo: &str, reference: &str) -> Error {
    match failure {
        GitFailure::Interrupted => Error::Interrupted {
            repo: repo.to_string(),
        },
        GitFailure::Spawn(source) => Error::GitUnavailable { source },
        exited @ GitFailure::Exited { .. } => Error::SourceFetch {
            repo: repo.to_string(),
            reference: reference.to_string(),
            message: exited.to_string(),
        },
    }
}

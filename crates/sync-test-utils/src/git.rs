//! Git repository fixtures.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Realism level: **FAKE**: directory structure only, no git object store.
///
/// Use for: tests that need a `.git` marker to bound config discovery.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Run `git` in `path`, panicking with stderr on failure.
fn run(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("git fixture: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "git fixture: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// A real git repository standing in for the canonical source repository.
///
/// Realism level: **REAL WITH HISTORY** once [`SourceRepo::commit`] is called.
/// The default branch is always `main`, and fetching unadvertised commits
/// by id is allowed so commit pinning can be exercised locally.
///
/// # Example
///
/// ```rust,no_run
/// use sync_test_utils::git::SourceRepo;
///
/// let source = SourceRepo::new();
/// source.write("a.txt", "hello\n");
/// let sha = source.commit("add a.txt");
/// source.tag("v1.0.0");
/// ```
pub struct SourceRepo {
    dir: TempDir,
}

impl Default for SourceRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRepo {
    /// Initialise an empty repository on branch `main`.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        run(path, &["init", "--quiet"]);
        run(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        run(path, &["config", "user.email", "test@test.com"]);
        run(path, &["config", "user.name", "Test User"]);
        run(path, &["config", "commit.gpgsign", "false"]);
        run(path, &["config", "tag.gpgsign", "false"]);
        run(path, &["config", "uploadpack.allowAnySHA1InWant", "true"]);

        Self { dir }
    }

    /// Root of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location to put in `source.repo`.
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Write `content` to `path` (relative), creating parent directories.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) -> &Self {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        self
    }

    /// Delete `path` (relative) from the working tree.
    pub fn remove(&self, path: &str) -> &Self {
        fs::remove_file(self.path().join(path)).unwrap();
        self
    }

    /// Stage everything and commit, returning the new commit id.
    pub fn commit(&self, message: &str) -> String {
        run(self.path(), &["add", "-A"]);
        run(self.path(), &["commit", "--quiet", "-m", message]);
        self.head()
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) -> &Self {
        run(self.path(), &["tag", name]);
        self
    }

    /// Create and switch to a new branch at HEAD.
    pub fn branch(&self, name: &str) -> &Self {
        run(self.path(), &["checkout", "--quiet", "-b", name]);
        self
    }

    /// Switch to an existing branch.
    pub fn checkout(&self, name: &str) -> &Self {
        run(self.path(), &["checkout", "--quiet", name]);
        self
    }

    /// Commit id of HEAD, read with `git2`.
    pub fn head(&self) -> String {
        let repo = git2::Repository::open(self.path()).unwrap_or_else(|e| {
            panic!(
                "SourceRepo::head: failed to open {}: {e}",
                self.path().display()
            )
        });
        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .unwrap_or_else(|e| panic!("SourceRepo::head: no commit at HEAD: {e}"));
        commit.id().to_string()
    }
}

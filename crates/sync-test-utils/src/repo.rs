//! [`ConsumerRepo`] builder for consumer working tree scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git::fake_git_dir;

/// A temporary consumer repository with helpers for writing the opt-in
/// config and asserting on synced files.
///
/// The root carries a fake `.git` marker so config discovery never walks
/// out of the fixture.
///
/// # Example
///
/// ```rust,no_run
/// use sync_test_utils::repo::ConsumerRepo;
///
/// let repo = ConsumerRepo::new();
/// repo.write_sync_config("/path/to/source", "main", &[("a.txt", "a.txt")], None);
/// repo.write_file("a.txt", "hello\n");
/// repo.assert_file_eq("a.txt", "hello\n");
/// ```
pub struct ConsumerRepo {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for ConsumerRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsumerRepo {
    /// Create an empty consumer root with a `.git` marker.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fake_git_dir(temp_dir.path());
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Return the canonical root path of the temporary directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write raw `.sync-files.toml` content at the root.
    pub fn write_config(&self, content: &str) {
        fs::write(self.root().join(".sync-files.toml"), content).unwrap();
    }

    /// Write a well-formed `.sync-files.toml`.
    ///
    /// `files` holds `(src, dst)` pairs; `mode` fills `options.mode` when set.
    pub fn write_sync_config(
        &self,
        repo: &str,
        reference: &str,
        files: &[(&str, &str)],
        mode: Option<&str>,
    ) {
        let mut config = format!(
            "[source]\nrepo = {}\nref = {}\n",
            toml_string(repo),
            toml_string(reference)
        );
        for (src, dst) in files {
            config.push_str(&format!(
                "\n[[files]]\nsrc = {}\ndst = {}\n",
                toml_string(src),
                toml_string(dst)
            ));
        }
        if let Some(mode) = mode {
            config.push_str(&format!("\n[options]\nmode = {}\n", toml_string(mode)));
        }
        self.write_config(&config);
    }

    /// Write `content` to `path` (relative), creating parent directories.
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    /// Read the bytes at `path` (relative).
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> Vec<u8> {
        let full = self.root().join(path);
        fs::read(&full).unwrap_or_else(|_| panic!("Could not read file: {}", full.display()))
    }

    /// Assert that the file at `path` holds exactly `expected`.
    ///
    /// # Panics
    /// Panics if the file is missing or differs.
    pub fn assert_file_eq(&self, path: &str, expected: impl AsRef<[u8]>) {
        let actual = self.read_file(path);
        assert!(
            actual == expected.as_ref(),
            "File {} has unexpected content.\nExpected: {:?}\nActual: {:?}",
            path,
            String::from_utf8_lossy(expected.as_ref()),
            String::from_utf8_lossy(&actual)
        );
    }

    /// Assert that `path` (relative to the repo root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

/// Quote a value as a TOML basic string.
fn toml_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

//! Byte-exact reads and atomic writes

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::{Error, Result};

/// Read a file's bytes, treating a missing file as `None`.
///
/// Any other failure (permission denied, a directory in place of the file)
/// is an error.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write content atomically to a file.
///
/// Missing parent directories are created. Content goes to a temporary
/// sibling first and is renamed over the target, so readers see either the
/// old or the new content, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let written = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }

    tracing::trace!(path = %path.display(), bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Give `to` the permission bits of `from`.
///
/// Only meaningful on Unix, where it keeps executable scripts executable.
/// Elsewhere this is a no-op so a read-only source never locks the copy.
pub fn copy_permissions(from: &Path, to: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        let permissions = fs::metadata(from)
            .map_err(|e| Error::io(from, e))?
            .permissions();
        fs::set_permissions(to, permissions).map_err(|e| Error::io(to, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (from, to);
    }
    Ok(())
}

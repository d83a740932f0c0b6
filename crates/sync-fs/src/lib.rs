//! Filesystem primitives for sync-files
//!
//! Provides repo-relative path validation, containment checks, content
//! fingerprints and atomic writes.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::Fingerprint;
pub use constants::SyncPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, ensure_within};

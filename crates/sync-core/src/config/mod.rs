//! Opt-in configuration discovery and validation
//!
//! A consumer repository opts in by committing `.sync-files.toml`:
//!
//! ```toml
//! [source]
//! repo = "https://github.com/org/canonical.git"
//! ref  = "v1.4.0"
//!
//! [[files]]
//! src = "ci/lint.yml"
//! dst = ".github/workflows/lint.yml"
//!
//! [options]
//! mode = "check"
//! ```
//!
//! The file is searched for from a starting directory upward, stopping at a
//! repository boundary (`.git`). Destination paths resolve against the
//! directory holding the file.

mod manifest;
mod resolver;

pub use manifest::{FilePair, SyncConfig};
pub use resolver::{ConfigResolver, DiscoveredConfig};

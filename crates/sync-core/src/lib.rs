//! Core sync engine for sync-files
//!
//! Keeps files in a consumer repository identical to their canonical
//! counterparts in a source repository pinned at a ref:
//!
//! - **Config resolution**: find and validate `.sync-files.toml`
//! - **Comparison**: SHA-256 fingerprints of every declared file pair
//! - **Enforcement**: report drift (check mode) or overwrite it (write mode)
//! - **SyncEngine**: one run from config to [`RunOutcome`]
//!
//! # Architecture
//!
//! ```text
//!                 sync-cli
//!                    |
//!                sync-core
//!                 /     \
//!           sync-git   sync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sync_core::{Mode, RunOutcome, SyncEngine};
//!
//! let outcome = SyncEngine::new("/path/to/consumer").with_mode(Mode::Write).run();
//! assert!(matches!(outcome, RunOutcome::Pass(_) | RunOutcome::NoOpNoConfig));
//! ```

pub mod config;
pub mod error;
pub mod mode;
pub mod sync;

pub use config::{ConfigResolver, DiscoveredConfig, FilePair, SyncConfig};
pub use error::{Error, ErrorKind, Result};
pub use mode::Mode;
pub use sync::{
    Diagnostic, DiagnosticKind, PairComparison, PairStatus, RunOutcome, SyncAction, SyncEngine,
    SyncReport, SyncedFile,
};

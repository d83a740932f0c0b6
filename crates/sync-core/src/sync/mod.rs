//! SyncEngine and the stages it runs
//!
//! This module provides:
//! - **compare**: fingerprint each file pair against the materialized source
//! - **enforce**: turn comparisons into diagnostics or writes, per mode
//! - **report**: diagnostics, synced files and the run outcome
//! - **engine**: the orchestrator tying config, fetch, compare and enforce

mod compare;
mod engine;
mod enforce;
mod report;

pub use compare::{PairComparison, PairStatus, compare, compare_pair};
pub use engine::SyncEngine;
pub use enforce::{Enforcement, enforce};
pub use report::{Diagnostic, DiagnosticKind, RunOutcome, SyncAction, SyncReport, SyncedFile};

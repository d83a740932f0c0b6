//! Process exit statuses

use sync_core::{ErrorKind, RunOutcome};

pub const SUCCESS: i32 = 0;
/// Drift or any other per-file failure
pub const FAILED: i32 = 1;
pub const CONFIG: i32 = 2;
pub const FETCH: i32 = 3;
pub const IO: i32 = 4;
pub const INTERRUPTED: i32 = 130;

/// Exit status for a finished run.
pub fn for_outcome(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::NoOpNoConfig | RunOutcome::Pass(_) => SUCCESS,
        RunOutcome::Fail(_) => FAILED,
        RunOutcome::FatalError(e) => for_kind(e.kind()),
    }
}

/// Exit status for a fatal error category.
pub fn for_kind(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::ConfigNotFound | ErrorKind::ConfigParse | ErrorKind::ConfigValidation => CONFIG,
        ErrorKind::SourceFetch => FETCH,
        ErrorKind::Interrupted => INTERRUPTED,
        ErrorKind::Io => IO,
    }
}

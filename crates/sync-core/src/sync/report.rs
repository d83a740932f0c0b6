//! Report types produced by a sync run

use std::fmt;

use serde::Serialize;
use sync_fs::{Fingerprint, NormalizedPath};

use crate::config::FilePair;
use crate::{Error, Mode};

/// Why a file pair failed the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Local content differs from the source
    Differ {
        expected: Fingerprint,
        actual: Fingerprint,
    },
    /// The local file does not exist
    DestMissing,
    /// The source file does not exist at the pinned ref
    SourceMissing,
    /// One side exists but could not be read
    ReadFailed { message: String },
    /// Writing the local file failed in write mode
    WriteFailed { message: String },
}

/// A per-file problem, with enough detail to fix it without re-running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub src: NormalizedPath,
    pub dst: NormalizedPath,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(pair: &FilePair, kind: DiagnosticKind) -> Self {
        Self {
            src: pair.src.clone(),
            dst: pair.dst.clone(),
            kind,
        }
    }

    /// Whether this is plain drift, which write mode would repair.
    pub fn is_drift(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::Differ { .. } | DiagnosticKind::DestMissing
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Differ { expected, actual } => write!(
                f,
                "{} differs from source {} (expected {}, found {})",
                self.dst,
                self.src,
                expected.short(),
                actual.short()
            ),
            DiagnosticKind::DestMissing => {
                write!(f, "{} does not exist (source {})", self.dst, self.src)
            }
            DiagnosticKind::SourceMissing => write!(
                f,
                "{}: source file {} does not exist in the source repository",
                self.dst, self.src
            ),
            DiagnosticKind::ReadFailed { message } => {
                write!(f, "{}: could not read: {}", self.dst, message)
            }
            DiagnosticKind::WriteFailed { message } => {
                write!(f, "{}: write failed: {}", self.dst, message)
            }
        }
    }
}

/// What write mode did to a local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
}

/// A local file written to match the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncedFile {
    pub src: NormalizedPath,
    pub dst: NormalizedPath,
    pub action: SyncAction,
}

impl fmt::Display for SyncedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            SyncAction::Created => "Created",
            SyncAction::Updated => "Updated",
        };
        write!(f, "{} {} from {}", verb, self.dst, self.src)
    }
}

/// Everything a completed run observed and did.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub mode: Mode,
    pub source_repo: String,
    pub source_ref: String,
    /// Commit the ref resolved to, when known
    pub commit: Option<String>,
    /// Number of file pairs compared
    pub compared: usize,
    /// Number of pairs already identical
    pub identical: usize,
    /// Files written in write mode
    pub synced: Vec<SyncedFile>,
    /// Per-file failures, in configured order
    pub diagnostics: Vec<Diagnostic>,
}

impl SyncReport {
    /// Whether the run passed.
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether any failure is plain drift that write mode would fix.
    pub fn has_drift(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_drift)
    }
}

/// Terminal value of one invocation.
#[derive(Debug)]
pub enum RunOutcome {
    /// No configuration anywhere up to the repository boundary
    NoOpNoConfig,
    /// Every pair identical, or every drifted pair reconciled
    Pass(SyncReport),
    /// At least one per-file diagnostic
    Fail(SyncReport),
    /// The run could not reach a per-file verdict
    FatalError(Error),
}

impl RunOutcome {
    /// Whether the caller should exit successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::NoOpNoConfig | Self::Pass(_))
    }

    /// The report, for outcomes that have one.
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            Self::Pass(report) | Self::Fail(report) => Some(report),
            Self::NoOpNoConfig | Self::FatalError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> FilePair {
        FilePair {
            src: NormalizedPath::relative("templates/a.txt").unwrap(),
            dst: NormalizedPath::relative("a.txt").unwrap(),
        }
    }

    #[test]
    fn differ_names_both_paths_and_fingerprints() {
        let expected = Fingerprint::of(b"hello\n");
        let actual = Fingerprint::of(b"hello world\n");
        let diag = Diagnostic::new(&pair(), DiagnosticKind::Differ { expected, actual });

        let msg = diag.to_string();
        assert!(msg.contains("a.txt"));
        assert!(msg.contains("templates/a.txt"));
        assert!(msg.contains(&expected.short()));
        assert!(msg.contains(&actual.short()));
        assert!(diag.is_drift());
    }

    #[test]
    fn source_missing_is_not_drift() {
        let diag = Diagnostic::new(&pair(), DiagnosticKind::SourceMissing);
        assert!(!diag.is_drift());
        assert!(diag.to_string().contains("does not exist in the source repository"));
    }

    #[test]
    fn diagnostic_serializes_flat_with_kind_tag() {
        let diag = Diagnostic::new(&pair(), DiagnosticKind::DestMissing);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["kind"], "dest_missing");
        assert_eq!(json["dst"], "a.txt");
        assert_eq!(json["src"], "templates/a.txt");
    }

    #[test]
    fn outcome_success_mapping() {
        assert!(RunOutcome::NoOpNoConfig.is_success());
        assert!(!RunOutcome::FatalError(Error::Interrupted).is_success());
    }
}

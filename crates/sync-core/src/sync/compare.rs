//! Fingerprint comparison of file pairs
//!
//! Reads both sides of every pair and compares SHA-256 digests of the exact
//! bytes. Nothing here writes.

use std::path::Path;

use serde::Serialize;
use sync_fs::{Fingerprint, io};
use sync_git::MaterializedSource;

use super::report::{Diagnostic, DiagnosticKind};
use crate::config::FilePair;

/// Verdict for a single file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    Identical,
    Differ,
    SourceMissing,
    DestMissing,
}

impl PairStatus {
    /// Drift is what write mode repairs; a missing source is not drift.
    pub fn is_drift(&self) -> bool {
        matches!(self, Self::Differ | Self::DestMissing)
    }
}

/// Result of comparing one pair, with fingerprints for the sides that exist.
#[derive(Debug, Clone)]
pub struct PairComparison {
    pub pair: FilePair,
    pub status: PairStatus,
    pub source: Option<Fingerprint>,
    pub dest: Option<Fingerprint>,
    source_content: Option<Vec<u8>>,
}

impl PairComparison {
    /// Canonical bytes, kept so write mode need not read them again.
    pub fn source_content(&self) -> Option<&[u8]> {
        self.source_content.as_deref()
    }

    /// The diagnostic check mode reports for this pair, if any.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        let kind = match self.status {
            PairStatus::Identical => return None,
            PairStatus::SourceMissing => DiagnosticKind::SourceMissing,
            PairStatus::DestMissing => DiagnosticKind::DestMissing,
            PairStatus::Differ => match (self.source, self.dest) {
                (Some(expected), Some(actual)) => DiagnosticKind::Differ { expected, actual },
                _ => return None,
            },
        };
        Some(Diagnostic::new(&self.pair, kind))
    }
}

/// Compare one pair.
///
/// A side that exists but cannot be read yields a `ReadFailed` diagnostic.
pub fn compare_pair(
    source: &MaterializedSource,
    root: &Path,
    pair: &FilePair,
) -> Result<PairComparison, Diagnostic> {
    let read_failed = |side: &str, message: String| {
        Diagnostic::new(
            pair,
            DiagnosticKind::ReadFailed {
                message: format!("{} side: {}", side, message),
            },
        )
    };

    let source_content = source
        .read(&pair.src)
        .map_err(|e| read_failed("source", e.to_string()))?;
    let Some(source_content) = source_content else {
        return Ok(PairComparison {
            pair: pair.clone(),
            status: PairStatus::SourceMissing,
            source: None,
            dest: None,
            source_content: None,
        });
    };
    let source_fp = Fingerprint::of(&source_content);

    let dest_path = pair.dst.resolve_under(root);
    let dest_content =
        io::read_optional(&dest_path).map_err(|e| read_failed("destination", e.to_string()))?;
    let dest_fp = dest_content.as_deref().map(Fingerprint::of);

    let status = match dest_fp {
        None => PairStatus::DestMissing,
        Some(fp) if fp == source_fp => PairStatus::Identical,
        Some(_) => PairStatus::Differ,
    };

    Ok(PairComparison {
        pair: pair.clone(),
        status,
        source: Some(source_fp),
        dest: dest_fp,
        source_content: Some(source_content),
    })
}

/// Compare every pair, in configured order.
pub fn compare(
    source: &MaterializedSource,
    root: &Path,
    pairs: &[FilePair],
) -> Vec<Result<PairComparison, Diagnostic>> {
    pairs
        .iter()
        .map(|pair| {
            let result = compare_pair(source, root, pair);
            match &result {
                Ok(c) => tracing::debug!(
                    src = %pair.src,
                    dst = %pair.dst,
                    status = ?c.status,
                    "Compared file pair"
                ),
                Err(d) => tracing::debug!(src = %pair.src, dst = %pair.dst, "{}", d),
            }
            result
        })
        .collect()
}

//! Mode enforcement: report drift or overwrite it

use std::path::Path;

use sync_fs::{ensure_within, io};
use sync_git::{InterruptFlag, MaterializedSource};

use super::compare::{PairComparison, PairStatus};
use super::report::{Diagnostic, DiagnosticKind, SyncAction, SyncedFile};
use crate::{Error, Mode, Result};

/// What enforcement produced for a set of comparisons.
#[derive(Debug, Default)]
pub struct Enforcement {
    pub identical: usize,
    pub synced: Vec<SyncedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Apply `mode` to compared pairs.
///
/// In check mode every drifted pair becomes a diagnostic. In write mode
/// drifted pairs are written from the canonical bytes; a missing source is
/// always reported and never written, and does not stop other pairs from
/// being reconciled. Identical pairs are never touched.
pub fn enforce(
    mode: Mode,
    root: &Path,
    source: &MaterializedSource,
    comparisons: Vec<std::result::Result<PairComparison, Diagnostic>>,
    interrupt: &InterruptFlag,
) -> Result<Enforcement> {
    let mut out = Enforcement::default();

    for comparison in comparisons {
        let comparison = match comparison {
            Ok(c) => c,
            Err(diagnostic) => {
                out.diagnostics.push(diagnostic);
                continue;
            }
        };

        match comparison.status {
            PairStatus::Identical => out.identical += 1,
            PairStatus::SourceMissing => out.diagnostics.extend(comparison.diagnostic()),
            PairStatus::Differ | PairStatus::DestMissing if !mode.writes() => {
                out.diagnostics.extend(comparison.diagnostic())
            }
            PairStatus::Differ | PairStatus::DestMissing => {
                if interrupt.is_raised() {
                    return Err(Error::Interrupted);
                }
                match write_pair(root, source, &comparison) {
                    Ok(synced) => {
                        tracing::info!(dst = %synced.dst, action = ?synced.action, "Synced file");
                        out.synced.push(synced);
                    }
                    Err(message) => {
                        tracing::debug!(dst = %comparison.pair.dst, %message, "Failed to sync file");
                        out.diagnostics.push(Diagnostic::new(
                            &comparison.pair,
                            DiagnosticKind::WriteFailed { message },
                        ));
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Overwrite or create the local side of a drifted pair.
fn write_pair(
    root: &Path,
    source: &MaterializedSource,
    comparison: &PairComparison,
) -> std::result::Result<SyncedFile, String> {
    let pair = &comparison.pair;
    let content = comparison
        .source_content()
        .ok_or_else(|| "source content unavailable".to_string())?;
    let dest = pair.dst.resolve_under(root);

    ensure_within(root, &dest).map_err(|e| e.to_string())?;
    io::write_atomic(&dest, content).map_err(|e| e.to_string())?;

    if let Err(e) = io::copy_permissions(&source.resolve(&pair.src), &dest) {
        tracing::warn!(dst = %pair.dst, error = %e, "Could not copy file permissions");
    }

    let action = match comparison.status {
        PairStatus::DestMissing => SyncAction::Created,
        _ => SyncAction::Updated,
    };
    Ok(SyncedFile {
        src: pair.src.clone(),
        dst: pair.dst.clone(),
        action,
    })
}

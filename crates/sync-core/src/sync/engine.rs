//! SyncEngine implementation
//!
//! The SyncEngine runs one sync end to end: resolve configuration,
//! materialize the source, compare, enforce the mode, release the source.

use std::path::PathBuf;

use sync_git::{GitCliFetcher, InterruptFlag, MaterializedSource, SourceFetcher};

use super::compare::compare;
use super::enforce::{Enforcement, enforce};
use super::report::{RunOutcome, SyncReport};
use crate::config::{ConfigResolver, DiscoveredConfig};
use crate::{Error, Mode, Result};

/// Orchestrates a single sync run.
///
/// The engine is the only entry point a front end needs:
///
/// ```no_run
/// use sync_core::{RunOutcome, SyncEngine};
///
/// match SyncEngine::new(".").run() {
///     RunOutcome::NoOpNoConfig | RunOutcome::Pass(_) => {}
///     RunOutcome::Fail(report) => eprintln!("{} file(s) drifted", report.diagnostics.len()),
///     RunOutcome::FatalError(e) => eprintln!("{}", e),
/// }
/// ```
pub struct SyncEngine {
    /// Directory config discovery starts from
    start: PathBuf,
    /// Explicit config file, bypassing discovery
    config_path: Option<PathBuf>,
    /// Mode forced by the caller; otherwise the config default applies
    mode_override: Option<Mode>,
    /// Source fetcher; a [`GitCliFetcher`] sharing `interrupt` when unset
    fetcher: Option<Box<dyn SourceFetcher>>,
    interrupt: InterruptFlag,
}

impl SyncEngine {
    /// Create an engine that discovers configuration from `start`.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            config_path: None,
            mode_override: None,
            fetcher: None,
            interrupt: InterruptFlag::new(),
        }
    }

    /// Force a mode regardless of the configured default.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode_override = Some(mode);
        self
    }

    /// Use this configuration file instead of searching for one.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Replace the default git fetcher.
    pub fn with_fetcher(mut self, fetcher: impl SourceFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Stop at the next safe point once `interrupt` is raised.
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run once, folding fatal errors into [`RunOutcome::FatalError`].
    pub fn run(&self) -> RunOutcome {
        match self.try_run() {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, kind = ?e.kind(), "Sync run failed");
                RunOutcome::FatalError(e)
            }
        }
    }

    /// Run once.
    ///
    /// # Errors
    ///
    /// Configuration, fetch and interruption failures. Per-file problems
    /// are not errors; they produce [`RunOutcome::Fail`].
    pub fn try_run(&self) -> Result<RunOutcome> {
        let Some(discovered) = self.resolve_config()? else {
            tracing::info!(start = %self.start.display(), "No configuration found, nothing to do");
            return Ok(RunOutcome::NoOpNoConfig);
        };

        let config = &discovered.config;
        let mode = self.mode_override.unwrap_or(config.default_mode());
        tracing::info!(
            config = %discovered.path.display(),
            repo = config.source_repo(),
            reference = config.source_ref(),
            %mode,
            "Starting sync"
        );

        let source = match &self.fetcher {
            Some(fetcher) => fetcher.fetch(config.source_repo(), config.source_ref())?,
            None => GitCliFetcher::new()
                .with_interrupt(self.interrupt.clone())
                .fetch(config.source_repo(), config.source_ref())?,
        };
        let commit = source.commit().map(str::to_string);

        let enforced = self.reconcile(mode, &discovered, &source);
        release(source);
        let enforcement = enforced?;

        let report = SyncReport {
            mode,
            source_repo: config.source_repo().to_string(),
            source_ref: config.source_ref().to_string(),
            commit,
            compared: config.file_pairs().len(),
            identical: enforcement.identical,
            synced: enforcement.synced,
            diagnostics: enforcement.diagnostics,
        };
        tracing::info!(
            compared = report.compared,
            identical = report.identical,
            synced = report.synced.len(),
            failed = report.diagnostics.len(),
            "Sync finished"
        );

        Ok(if report.passed() {
            RunOutcome::Pass(report)
        } else {
            RunOutcome::Fail(report)
        })
    }

    fn resolve_config(&self) -> Result<Option<DiscoveredConfig>> {
        match &self.config_path {
            Some(path) => ConfigResolver::load(path).map(Some),
            None => ConfigResolver::new(&self.start).resolve(),
        }
    }

    fn reconcile(
        &self,
        mode: Mode,
        discovered: &DiscoveredConfig,
        source: &MaterializedSource,
    ) -> Result<Enforcement> {
        if self.interrupt.is_raised() {
            return Err(Error::Interrupted);
        }
        let comparisons = compare(source, &discovered.root, discovered.config.file_pairs());
        enforce(mode, &discovered.root, source, comparisons, &self.interrupt)
    }
}

/// Remove the materialized source; failure to clean up is only logged.
fn release(source: MaterializedSource) {
    let root = source.root().to_path_buf();
    match source.close() {
        Ok(()) => tracing::debug!(path = %root.display(), "Removed temporary checkout"),
        Err(e) => tracing::warn!(
            path = %root.display(),
            error = %e,
            "Failed to remove temporary checkout"
        ),
    }
}

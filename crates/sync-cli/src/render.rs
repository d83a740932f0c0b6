//! Human and JSON presentation of a run outcome

use colored::Colorize;
use serde_json::{Value, json};
use sync_core::{Diagnostic, DiagnosticKind, Error, ErrorKind, Mode, RunOutcome, SyncReport};

/// Hint printed when check mode finds drift that write mode would fix.
pub const WRITE_HINT: &str = "Run with --write to automatically sync files.";

/// Print `outcome` for a person: progress on stdout, problems on stderr.
pub fn human(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NoOpNoConfig => {
            println!(
                "{} No .sync-files.toml found; nothing to sync.",
                "--".dimmed()
            );
        }
        RunOutcome::Pass(report) => render_pass(report),
        RunOutcome::Fail(report) => render_fail(report),
        RunOutcome::FatalError(e) => render_error(e),
    }
}

/// The JSON document printed by `--json`.
pub fn json(outcome: &RunOutcome) -> serde_json::Result<Value> {
    Ok(match outcome {
        RunOutcome::NoOpNoConfig => json!({ "outcome": "no_config" }),
        RunOutcome::Pass(report) => json!({
            "outcome": "pass",
            "report": serde_json::to_value(report)?,
        }),
        RunOutcome::Fail(report) => json!({
            "outcome": "fail",
            "report": serde_json::to_value(report)?,
        }),
        RunOutcome::FatalError(e) => json!({
            "outcome": "error",
            "error": {
                "kind": kind_label(e.kind()),
                "message": e.to_string(),
            },
        }),
    })
}

fn render_pass(report: &SyncReport) {
    let source = source_label(report);
    if report.synced.is_empty() {
        println!(
            "{} All {} file(s) match {}.",
            "OK".green().bold(),
            report.compared,
            source.cyan()
        );
        return;
    }
    println!(
        "{} Synced {} file(s) from {}:",
        "OK".green().bold(),
        report.synced.len(),
        source.cyan()
    );
    for synced in &report.synced {
        println!("   {} {}", "+".green(), synced);
    }
}

fn render_fail(report: &SyncReport) {
    for synced in &report.synced {
        println!("   {} {}", "+".green(), synced);
    }

    let label = if report.has_drift() && report.mode == Mode::Check {
        "DRIFTED".yellow().bold()
    } else {
        "FAILED".red().bold()
    };
    eprintln!(
        "{} {} of {} file(s) not in sync with {}:",
        label,
        report.diagnostics.len(),
        report.compared,
        source_label(report).cyan()
    );
    for diagnostic in &report.diagnostics {
        eprintln!("   {} {}", marker(diagnostic), diagnostic);
    }

    if report.mode == Mode::Check && report.has_drift() {
        eprintln!();
        eprintln!("{}", WRITE_HINT);
    }
}

fn render_error(e: &Error) {
    let label = match e.kind() {
        ErrorKind::ConfigNotFound | ErrorKind::ConfigParse | ErrorKind::ConfigValidation => {
            "config error".red().bold()
        }
        ErrorKind::SourceFetch => "fetch error".red().bold(),
        ErrorKind::Interrupted => "interrupted".yellow().bold(),
        ErrorKind::Io => "error".red().bold(),
    };
    eprintln!("{}: {}", label, e);
}

fn marker(diagnostic: &Diagnostic) -> colored::ColoredString {
    match diagnostic.kind {
        DiagnosticKind::Differ { .. } => "!".yellow(),
        DiagnosticKind::DestMissing => "-".yellow(),
        DiagnosticKind::SourceMissing
        | DiagnosticKind::ReadFailed { .. }
        | DiagnosticKind::WriteFailed { .. } => "x".red(),
    }
}

fn source_label(report: &SyncReport) -> String {
    match &report.commit {
        Some(commit) => format!(
            "{}@{} ({})",
            report.source_repo,
            report.source_ref,
            commit.get(..12).unwrap_or(commit)
        ),
        None => format!("{}@{}", report.source_repo, report.source_ref),
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ConfigNotFound => "config_not_found",
        ErrorKind::ConfigParse => "config_parse",
        ErrorKind::ConfigValidation => "config_validation",
        ErrorKind::SourceFetch => "source_fetch",
        ErrorKind::Interrupted => "interrupted",
        ErrorKind::Io => "io",
    }
}

//! Supervised `git` subprocess invocation

use std::ffi::OsStr;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use crate::InterruptFlag;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a single git invocation did not succeed.
#[derive(Debug)]
pub(crate) enum GitFailure {
    /// git ran and exited unsuccessfully
    Exited { status: ExitStatus, stderr: String },
    /// git could not be started or waited on
    Spawn(std::io::Error),
    /// The interrupt flag was raised while git was running
    Interrupted,
}

impl GitFailure {
    /// Failures that no fallback strategy can recover from.
    pub(crate) fn is_terminal(&self) -> bool {
        !matches!(self, Self::Exited { .. })
    }
}

impl fmt::Display for GitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited { status, stderr } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    write!(f, "git exited with {}", status)
                } else {
                    write!(f, "{}", stderr)
                }
            }
            Self::Spawn(e) => write!(f, "failed to run git: {}", e),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Run git with `args`, optionally inside `cwd`.
///
/// stdout is discarded and stderr captured for diagnostics. Credential
/// prompts are disabled so an unauthenticated remote fails instead of
/// blocking. The child is killed if `interrupt` is raised.
pub(crate) fn run_git<I, S>(
    args: I,
    cwd: Option<&Path>,
    interrupt: &InterruptFlag,
) -> Result<(), GitFailure>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new("git");
    command
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    tracing::trace!(?command, "Spawning git");
    let mut child = command.spawn().map_err(GitFailure::Spawn)?;

    // Drain stderr concurrently so a chatty child never blocks on a full pipe
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    });

    let status = loop {
        if interrupt.is_raised() {
            reap(&mut child);
            return Err(GitFailure::Interrupted);
        }
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                reap(&mut child);
                return Err(GitFailure::Spawn(e));
            }
        }
    };

    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if status.success() {
        Ok(())
    } else {
        Err(GitFailure::Exited { status, stderr })
    }
}

/// Kill `child` and wait for it so no zombie is left behind.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

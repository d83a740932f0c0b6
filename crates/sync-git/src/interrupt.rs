//! Cooperative cancellation on SIGINT / SIGTERM

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};

/// Shared flag raised when the process is asked to stop.
///
/// Long-running steps poll it and unwind through their normal error path,
/// so scoped resources such as the temporary checkout are still released.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    /// A flag that is only raised programmatically.
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag raised by SIGINT or SIGTERM.
    ///
    /// A second signal while the flag is already raised terminates the
    /// process immediately with exit status 130.
    pub fn install() -> std::io::Result<Self> {
        let flag = Self::new();
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register_conditional_shutdown(signal, 130, Arc::clone(&flag.0))?;
            signal_hook::flag::register(signal, Arc::clone(&flag.0))?;
        }
        tracing::debug!("Installed interrupt handlers");
        Ok(flag)
    }

    /// Raise the flag.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

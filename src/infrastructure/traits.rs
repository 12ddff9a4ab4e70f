//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::process::{Command, ExitStatus};

use crate::domain::ExternalCall;

/// Exit code reported for a child terminated by a signal (shell convention).
const SIGNAL_EXIT_BASE: i32 = 128;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion with inherited stdio.
    ///
    /// Blocks until the child exits and returns its exit code.
    /// Fails only if the child could not be started.
    fn run(&self, call: &ExternalCall) -> io::Result<i32>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, call: &ExternalCall) -> io::Result<i32> {
        let status = Command::new(&call.program)
            .args(&call.args)
            .current_dir(&call.cwd)
            .status()?;
        Ok(exit_code(status))
    }
}

/// Numeric exit code of a finished child.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }
    // Neither code nor signal: report a generic failure
    SIGNAL_EXIT_BASE
}

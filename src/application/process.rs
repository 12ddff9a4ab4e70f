//! Checked execution of external processes
//!
//! Every external call made by a task goes through [`run_checked`], so a
//! non-zero exit status always surfaces as `ApplicationError::ProcessFailed`
//! carrying the child's code.

use tracing::{debug, info, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::ExternalCall;
use crate::infrastructure::traits::CommandRunner;

/// Run `call` and fail if it exits non-zero.
pub fn run_checked(runner: &dyn CommandRunner, call: &ExternalCall) -> ApplicationResult<()> {
    let code = run_status(runner, call)?;
    if code != 0 {
        return Err(ApplicationError::ProcessFailed {
            program: call.program_name(),
            code,
        });
    }
    Ok(())
}

/// Run `call` and return its exit code, whatever it is.
///
/// Only a spawn failure is an error.
pub fn run_status(runner: &dyn CommandRunner, call: &ExternalCall) -> ApplicationResult<i32> {
    debug!("run: {} (cwd={})", call, call.cwd.display());
    let code = runner.run(call).with_program_context(call)?;
    if code == 0 {
        info!("{}: ok", call.program_name());
    } else {
        warn!("{}: exit code {}", call.program_name(), code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::RecordingRunner;
    use std::path::Path;

    #[test]
    fn given_zero_exit_when_run_checked_then_ok() {
        let runner = RecordingRunner::new();
        let call = ExternalCall::new("flake8", Path::new("/p"));

        run_checked(&runner, &call).unwrap();

        assert_eq!(runner.calls(), vec![call]);
    }

    #[test]
    fn given_nonzero_exit_when_run_checked_then_process_failed_with_code() {
        let runner = RecordingRunner::new().with_exit_code("flake8", 3);
        let call = ExternalCall::new("flake8", Path::new("/p"));

        let err = run_checked(&runner, &call).unwrap_err();

        assert_eq!(err.process_code(), Some(3));
        assert_eq!(err.to_string(), "flake8 failed with exit code 3");
    }

    #[test]
    fn given_missing_program_when_run_checked_then_spawn_error() {
        let runner = RecordingRunner::new().with_missing("pip");
        let call = ExternalCall::new("pip", Path::new("/p"));

        let err = run_checked(&runner, &call).unwrap_err();

        assert!(matches!(err, ApplicationError::Spawn { .. }));
        assert_eq!(err.process_code(), None);
    }
}

//! Lint service: style checker plus secondary linter
//!
//! Order is fixed: checker, linter compatibility pass, then the strict
//! linter pass when requested. The compatibility pass always runs.

use std::sync::Arc;

use tracing::instrument;

use crate::application::process::run_checked;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::ExternalCall;
use crate::infrastructure::traits::CommandRunner;

/// Lint service.
pub struct LintService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl LintService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// Style checker call, restricted to `target` when given and non-empty.
    pub fn checker_call(&self, target: Option<&str>) -> ExternalCall {
        let call = ExternalCall::new(&self.settings.lint.checker, &self.settings.project_dir);
        match target.filter(|t| !t.is_empty()) {
            Some(t) => call.arg(t),
            None => call,
        }
    }

    /// Secondary linter call; `compat` adds the forward-compatibility arguments.
    pub fn linter_call(&self, compat: bool) -> ExternalCall {
        let lint = &self.settings.lint;
        let call = ExternalCall::new(&lint.linter, &self.settings.project_dir)
            .args(lint.linter_args.iter().cloned())
            .arg(lint.package.as_str());
        if compat {
            call.args(lint.compat_args.iter().cloned())
        } else {
            call
        }
    }

    /// Check style with linters.
    ///
    /// # Arguments
    /// * `target` - Module(s) to check; the checker's default target set if None
    /// * `strict` - Also run the linter without the compatibility arguments
    #[instrument(skip(self))]
    pub fn lint(&self, target: Option<&str>, strict: bool) -> ApplicationResult<()> {
        run_checked(self.cmd.as_ref(), &self.checker_call(target))?;
        run_checked(self.cmd.as_ref(), &self.linter_call(true))?;
        if strict {
            run_checked(self.cmd.as_ref(), &self.linter_call(false))?;
        }
        Ok(())
    }
}

//! Dependency installation service

use std::sync::Arc;

use tracing::instrument;

use crate::application::process::run_checked;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::ExternalCall;
use crate::infrastructure::traits::CommandRunner;

/// Installs the project's dependency manifest.
pub struct DependencyService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl DependencyService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    pub fn install_call(&self) -> ExternalCall {
        let deps = &self.settings.deps;
        ExternalCall::new(&deps.installer, &self.settings.project_dir)
            .args(deps.install_args.iter().cloned())
            .arg(deps.manifest.as_str())
    }

    /// Install requirements.
    #[instrument(skip(self))]
    pub fn install(&self) -> ApplicationResult<()> {
        run_checked(self.cmd.as_ref(), &self.install_call())
    }
}

//! Packaging service: clean, build and upload distributions
//!
//! Each step delegates to one external program. Composite steps run in
//! order and stop at the first failure, whose exit code becomes theirs.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::process::run_checked;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::ExternalCall;
use crate::infrastructure::traits::CommandRunner;

/// Packaging service.
pub struct PackagingService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl PackagingService {
    /// Create a new packaging service.
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    fn helper(&self, script: &str) -> ExternalCall {
        ExternalCall::new(
            self.settings.helpers_path().join(script),
            &self.settings.project_dir,
        )
    }

    /// Glob matching every built distribution, left for the upload client to expand.
    pub fn dist_glob(&self) -> PathBuf {
        self.settings.dist_path().join("*")
    }

    /// Remove build artifacts.
    #[instrument(skip(self))]
    pub fn clean(&self) -> ApplicationResult<()> {
        run_checked(self.cmd.as_ref(), &self.helper(&self.settings.packaging.clean_script))
    }

    /// Create a source distribution package.
    #[instrument(skip(self))]
    pub fn sdist(&self) -> ApplicationResult<()> {
        run_checked(self.cmd.as_ref(), &self.helper(&self.settings.packaging.sdist_script))
    }

    /// Create a wheel package.
    #[instrument(skip(self))]
    pub fn wheel(&self) -> ApplicationResult<()> {
        run_checked(self.cmd.as_ref(), &self.helper(&self.settings.packaging.wheel_script))
    }

    /// Upload distribution files.
    #[instrument(skip(self))]
    pub fn upload(&self) -> ApplicationResult<()> {
        let packaging = &self.settings.packaging;
        let call = ExternalCall::new(&packaging.upload_client, &self.settings.project_dir)
            .args(packaging.upload_args.iter().cloned())
            .arg(self.dist_glob().to_string_lossy());
        run_checked(self.cmd.as_ref(), &call)
    }

    /// Clean, then create source and wheel distributions.
    #[instrument(skip(self))]
    pub fn build(&self) -> ApplicationResult<()> {
        self.clean()?;
        self.sdist()?;
        self.wheel()?;
        debug!("build: complete");
        Ok(())
    }

    /// Build, then upload.
    #[instrument(skip(self))]
    pub fn release(&self) -> ApplicationResult<()> {
        self.build()?;
        self.upload()?;
        debug!("release: complete");
        Ok(())
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/devtask/devtask.toml`
//! 3. Project config: `<project_dir>/.devtask.toml`
//! 4. Environment variables: `DEVTASK_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Helper scripts and upload client used by the packaging tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackagingConfig {
    /// Cleanup script name inside `helpers_dir`
    pub clean_script: String,
    /// Source distribution script name inside `helpers_dir`
    pub sdist_script: String,
    /// Wheel build script name inside `helpers_dir`
    pub wheel_script: String,
    /// Upload client executable
    pub upload_client: String,
    /// Arguments placed before the distribution glob
    pub upload_args: Vec<String>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            clean_script: "clean".into(),
            sdist_script: "srcdist".into(),
            wheel_script: "wheel".into(),
            upload_client: "twine".into(),
            upload_args: vec!["upload".into()],
        }
    }
}

/// Style checker and secondary linter used by `lint`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LintConfig {
    /// Style checker executable
    pub checker: String,
    /// Secondary linter executable
    pub linter: String,
    /// Linter options placed before the package
    pub linter_args: Vec<String>,
    /// Package the linter inspects
    pub package: String,
    /// Extra arguments for the forward-compatibility pass
    pub compat_args: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            checker: "flake8".into(),
            linter: "pylint".into(),
            linter_args: vec![
                "--rcfile=standard.rc".into(),
                "-rn".into(),
                "-fparseable".into(),
            ],
            package: "ckanext".into(),
            compat_args: vec!["--py3k".into()],
        }
    }
}

/// Dependency installer used by `pipme`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DepsConfig {
    pub installer: String,
    /// Arguments placed before the manifest
    pub install_args: Vec<String>,
    /// Dependency manifest, relative to the project directory
    pub manifest: String,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            installer: "pip".into(),
            install_args: vec!["install".into(), "-r".into()],
            manifest: "requirements.txt".into(),
        }
    }
}

/// Unified configuration for devtask.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Project base directory; set from the command line, never from files
    #[serde(skip)]
    pub project_dir: PathBuf,
    /// Helper script directory, relative to `project_dir` unless absolute
    pub helpers_dir: PathBuf,
    /// Distribution output directory, relative to `project_dir` unless absolute
    pub dist_dir: PathBuf,
    pub packaging: PackagingConfig,
    pub lint: LintConfig,
    pub deps: DepsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            helpers_dir: PathBuf::from("helpers"),
            dist_dir: PathBuf::from("dist"),
            packaging: PackagingConfig::default(),
            lint: LintConfig::default(),
            deps: DepsConfig::default(),
        }
    }
}

/// Get the XDG config directory for devtask.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "devtask").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("devtask.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".devtask.toml")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Directory holding the helper scripts.
    pub fn helpers_path(&self) -> PathBuf {
        self.project_dir.join(&self.helpers_dir)
    }

    /// Directory holding built distributions.
    pub fn dist_path(&self) -> PathBuf {
        self.project_dir.join(&self.dist_dir)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Project base directory (helpers, dist and project config live here)
    ///
    /// # Errors
    /// `ApplicationError::Config` if a config file cannot be parsed or a value
    /// has the wrong type.
    pub fn load(project_dir: &Path) -> Result<Self, ApplicationError> {
        let mut builder = Self::with_defaults(Config::builder())?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        let local_path = project_config_path(project_dir);
        if local_path.exists() {
            debug!("project config: {}", local_path.display());
            builder = builder.add_source(File::from(local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("DEVTASK")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("packaging.upload_args")
                .with_list_parse_key("lint.linter_args")
                .with_list_parse_key("lint.compat_args")
                .with_list_parse_key("deps.install_args")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.project_dir = project_dir.to_path_buf();
        settings.expand_paths();

        debug!("settings: {:?}", settings);
        Ok(settings)
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ApplicationError> {
        let defaults = Settings::default();
        builder
            .set_default("helpers_dir", defaults.helpers_dir.to_string_lossy().to_string())
            .and_then(|b| b.set_default("dist_dir", defaults.dist_dir.to_string_lossy().to_string()))
            .and_then(|b| b.set_default("packaging.clean_script", defaults.packaging.clean_script))
            .and_then(|b| b.set_default("packaging.sdist_script", defaults.packaging.sdist_script))
            .and_then(|b| b.set_default("packaging.wheel_script", defaults.packaging.wheel_script))
            .and_then(|b| b.set_default("packaging.upload_client", defaults.packaging.upload_client))
            .and_then(|b| b.set_default("packaging.upload_args", defaults.packaging.upload_args))
            .and_then(|b| b.set_default("lint.checker", defaults.lint.checker))
            .and_then(|b| b.set_default("lint.linter", defaults.lint.linter))
            .and_then(|b| b.set_default("lint.linter_args", defaults.lint.linter_args))
            .and_then(|b| b.set_default("lint.package", defaults.lint.package))
            .and_then(|b| b.set_default("lint.compat_args", defaults.lint.compat_args))
            .and_then(|b| b.set_default("deps.installer", defaults.deps.installer))
            .and_then(|b| b.set_default("deps.install_args", defaults.deps.install_args))
            .and_then(|b| b.set_default("deps.manifest", defaults.deps.manifest))
            .map_err(config_err)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.helpers_dir = PathBuf::from(expand_env_vars(&self.helpers_dir.to_string_lossy()));
        self.dist_dir = PathBuf::from(expand_env_vars(&self.dist_dir.to_string_lossy()));
    }
}

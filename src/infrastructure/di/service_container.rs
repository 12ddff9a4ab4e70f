//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DependencyService, LintService, PackagingService};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner};

/// Container holding all application services.
///
/// This is the context every registered task operation runs against.
pub struct ServiceContainer {
    pub packaging: PackagingService,
    pub lint: LintService,
    pub deps: DependencyService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealCommandRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, cmd: Arc<dyn CommandRunner>) -> Self {
        let settings = Arc::new(settings);

        Self {
            packaging: PackagingService::new(cmd.clone(), settings.clone()),
            lint: LintService::new(cmd.clone(), settings.clone()),
            deps: DependencyService::new(cmd, settings),
        }
    }
}

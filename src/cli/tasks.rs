//! Task declarations: the commands devtask offers and the services behind them

use crate::application::ApplicationError;
use crate::domain::{DomainResult, Flag, Registry};
use crate::infrastructure::di::ServiceContainer;

/// Registry of task operations run against the service container.
pub type TaskRegistry = Registry<ServiceContainer, ApplicationError>;

/// Build the registry with every task declared.
pub fn build_registry() -> DomainResult<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    register_tasks(&mut registry)?;
    Ok(registry)
}

/// Declare all tasks on `registry`.
pub fn register_tasks(registry: &mut TaskRegistry) -> DomainResult<()> {
    registry.register("lint", "Check style with linters", |c, p| {
        c.lint.lint(p.value("where"), p.is_set("strict"))
    })?;
    registry.add_flag("lint", Flag::value("where", Some('w'), "Modules to check"))?;
    registry.add_flag("lint", Flag::switch("strict", Some('s'), "Check with pylint"))?;

    registry.register("pipme", "Install requirements.txt", |c, _| c.deps.install())?;
    registry.register("clean", "Remove Python file and build artifacts", |c, _| {
        c.packaging.clean()
    })?;
    registry.register("sdist", "Create a source distribution package", |c, _| {
        c.packaging.sdist()
    })?;
    registry.register("wheel", "Create a wheel package", |c, _| c.packaging.wheel())?;
    registry.register(
        "build",
        "Create a source distribution and wheel package",
        |c, _| c.packaging.build(),
    )?;
    registry.register("upload", "Upload distribution files", |c, _| {
        c.packaging.upload()
    })?;
    registry.register("release", "Package and upload a release", |c, _| {
        c.packaging.release()
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_fresh_registry_when_building_then_declares_all_tasks() {
        let registry = build_registry().unwrap();

        let names: Vec<_> = registry.commands().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            ["lint", "pipme", "clean", "sdist", "wheel", "build", "upload", "release"]
        );
    }

    #[test]
    fn given_tasks_registered_when_registering_again_then_duplicate_fails() {
        let mut registry = build_registry().unwrap();

        let result = register_tasks(&mut registry);

        assert!(result.is_err());
    }
}

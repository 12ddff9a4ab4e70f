//! Dispatching the declared tasks against a recording command runner

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;

use devtask::cli::{build_registry, CliError, Dispatcher, TaskRegistry};
use devtask::config::Settings;
use devtask::exitcode;
use devtask::infrastructure::di::ServiceContainer;
use devtask::util::testing::{init_test_setup, RecordingRunner};

fn dispatcher() -> Dispatcher<ServiceContainer, devtask::application::ApplicationError> {
    init_test_setup();
    Dispatcher::new(build_registry().expect("task declarations are valid"))
}

fn container(runner: &Arc<RecordingRunner>) -> ServiceContainer {
    let settings = Settings {
        project_dir: PathBuf::from("/work/pkg"),
        ..Settings::default()
    };
    ServiceContainer::with_deps(settings, runner.clone())
}

#[rstest]
#[case("lint")]
#[case("pipme")]
#[case("clean")]
#[case("sdist")]
#[case("wheel")]
#[case("build")]
#[case("upload")]
#[case("release")]
fn given_unknown_flag_when_running_any_task_then_usage_error_and_no_process(
    #[case] task: &str,
) {
    // Arrange
    let runner = Arc::new(RecordingRunner::new());
    let container = container(&runner);

    // Act
    let err = dispatcher()
        .run(&container, ["devtask", task, "--no-such-flag"])
        .unwrap_err();

    // Assert
    assert!(matches!(err, CliError::Parse(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(runner.calls().is_empty());
}

#[test]
fn given_no_command_when_running_then_usage_error() {
    let runner = Arc::new(RecordingRunner::new());

    let err = dispatcher().run(&container(&runner), ["devtask"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(runner.calls().is_empty());
}

#[test]
fn given_clean_fails_when_running_build_then_exit_code_is_clean_code() {
    // Arrange
    let runner = Arc::new(RecordingRunner::new().with_exit_code("clean", 3));

    // Act
    let err = dispatcher()
        .run(&container(&runner), ["devtask", "build"])
        .unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), 3);
    assert_eq!(runner.programs(), vec!["clean"]);
}

#[test]
fn given_upload_fails_when_running_release_then_exit_code_is_upload_code() {
    let runner = Arc::new(RecordingRunner::new().with_exit_code("twine", 42));

    let err = dispatcher()
        .run(&container(&runner), ["devtask", "release"])
        .unwrap_err();

    assert_eq!(err.exit_code(), 42);
    assert_eq!(runner.programs(), vec!["clean", "srcdist", "wheel", "twine"]);
}

#[test]
fn given_where_and_strict_when_running_lint_then_flags_reach_tools() {
    // Arrange
    let runner = Arc::new(RecordingRunner::new());

    // Act
    dispatcher()
        .run(&container(&runner), ["devtask", "lint", "--where=foo", "--strict"])
        .unwrap();

    // Assert
    let calls = runner.calls();
    assert_eq!(runner.programs(), vec!["flake8", "pylint", "pylint"]);
    assert!(calls[0].args.iter().any(|a| a == "foo"));
}

#[test]
fn given_pipme_when_running_then_installs_manifest() {
    let runner = Arc::new(RecordingRunner::new().with_exit_code("pip", 1));

    let err = dispatcher()
        .run(&container(&runner), ["devtask", "pipme"])
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert_eq!(runner.calls()[0].args, vec!["install", "-r", "requirements.txt"]);
}

#[test]
fn given_missing_executable_when_running_then_generic_failure() {
    let runner = Arc::new(RecordingRunner::new().with_missing("wheel"));

    let err = dispatcher()
        .run(&container(&runner), ["devtask", "wheel"])
        .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::OSERR);
}

#[test]
fn given_clean_when_running_twice_then_same_exit_code() {
    let runner = Arc::new(RecordingRunner::new().with_exit_code("clean", 6));
    let dispatcher = dispatcher();
    let container = container(&runner);

    let first = dispatcher.run(&container, ["devtask", "clean"]).unwrap_err();
    let second = dispatcher.run(&container, ["devtask", "clean"]).unwrap_err();

    assert_eq!(first.exit_code(), second.exit_code());
    assert_eq!(runner.calls().len(), 2);
}

#[test]
fn given_tasks_declared_when_declaring_same_name_then_fails_before_dispatch() {
    let mut registry: TaskRegistry = build_registry().unwrap();

    let result = registry.register("build", "Shadow build", |c, _| c.packaging.build());

    assert!(result.is_err());
}

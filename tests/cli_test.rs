//! End-to-end runs of the devtask binary against real helper scripts.
//!
//! Kept in a single test so no other thread forks while a freshly written
//! script is still open (ETXTBSY).
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn devtask(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_devtask"))
        .arg("-C")
        .arg(project)
        .args(args)
        .env_remove("DEVTASK_PROJECT_DIR")
        .output()
        .expect("run devtask")
}

#[test]
fn given_helper_scripts_when_running_tasks_then_exit_codes_propagate() {
    // Arrange: clean and sdist succeed and leave a trace, wheel fails with 7
    let project = TempDir::new().unwrap();
    let helpers = project.path().join("helpers");
    fs::create_dir(&helpers).unwrap();
    write_script(&helpers, "clean", "echo clean >> trace.log");
    write_script(&helpers, "srcdist", "echo sdist >> trace.log");
    write_script(&helpers, "wheel", "echo wheel >> trace.log; exit 7");

    // Act / Assert: a single step
    let out = devtask(project.path(), &["clean"]);
    assert_eq!(out.status.code(), Some(0));

    // Act / Assert: build stops at the failing wheel step with its code
    let out = devtask(project.path(), &["build"]);
    assert_eq!(out.status.code(), Some(7));
    let trace = fs::read_to_string(project.path().join("trace.log")).unwrap();
    assert_eq!(trace, "clean\nclean\nsdist\nwheel\n");

    // Act / Assert: unknown flag is a usage error and runs nothing
    fs::remove_file(project.path().join("trace.log")).unwrap();
    let out = devtask(project.path(), &["clean", "--force"]);
    assert_eq!(out.status.code(), Some(64));
    assert!(!project.path().join("trace.log").exists());

    // Act / Assert: unknown command is a usage error
    let out = devtask(project.path(), &["deploy"]);
    assert_eq!(out.status.code(), Some(64));

    // Act / Assert: no command is a usage error, even with a bad project dir
    let out = devtask(project.path(), &[]);
    assert_eq!(out.status.code(), Some(64));
    let out = devtask(Path::new("/devtask/no/such/dir"), &[]);
    assert_eq!(out.status.code(), Some(64));
    fs::write(project.path().join(".devtask.toml"), "helpers_dir = [unclosed").unwrap();
    let out = devtask(project.path(), &[]);
    assert_eq!(out.status.code(), Some(64));
    fs::remove_file(project.path().join(".devtask.toml")).unwrap();

    // Act / Assert: help succeeds and lists the tasks
    let out = devtask(project.path(), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    let help = String::from_utf8_lossy(&out.stdout);
    assert!(help.contains("release"));
    assert!(help.contains("pipme"));

    // Act / Assert: missing helper script is a generic failure
    fs::remove_file(helpers.join("srcdist")).unwrap();
    let out = devtask(project.path(), &["sdist"]);
    assert_eq!(out.status.code(), Some(71));
    assert!(String::from_utf8_lossy(&out.stderr).contains("srcdist"));
}

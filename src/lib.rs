//! devtask: named development tasks over external packaging and lint tools
//!
//! Tasks are declared in a [`domain::Registry`], dispatched by
//! [`cli::Dispatcher`], and run against the services in
//! [`infrastructure::di::ServiceContainer`]. A failing external process
//! ends the run with that process's own exit code.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

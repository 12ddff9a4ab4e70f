//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod tasks;

pub use args::GlobalArgs;
pub use dispatch::{Dispatcher, Invocation};
pub use error::{CliError, CliResult};
pub use tasks::{build_registry, register_tasks, TaskRegistry};

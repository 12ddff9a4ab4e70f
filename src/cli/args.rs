//! Global CLI arguments, shared by every command

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueHint};
use clap_complete::Shell;

use crate::infrastructure::{InfraError, InfraResult};

/// Options accepted before or after any command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory holding helpers/ and dist/ (default: cwd)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "DEVTASK_PROJECT_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl GlobalArgs {
    /// Absolute project directory: `--project-dir` if given, else cwd.
    pub fn resolve_project_dir(&self) -> InfraResult<PathBuf> {
        let dir = match &self.project_dir {
            Some(dir) if !dir.is_dir() => return Err(InfraError::ProjectDir(dir.clone())),
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|e| InfraError::io("read current directory", e))?,
        };
        dir.canonicalize()
            .map_err(|e| InfraError::io(format!("resolve {}", dir.display()), e))
    }
}

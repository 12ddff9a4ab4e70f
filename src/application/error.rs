//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// An external process ran and exited non-zero.
    #[error("{program} failed with exit code {code}")]
    ProcessFailed { program: String, code: i32 },

    /// An external process could not be started.
    #[error("cannot run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Exit code of the failed external process, if that is what failed.
    pub fn process_code(&self) -> Option<i32> {
        match self {
            ApplicationError::ProcessFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

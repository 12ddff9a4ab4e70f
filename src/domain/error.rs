//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors are defects in the task declarations themselves.
/// They surface at registration time, before any user input is parsed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("command already registered: {0}")]
    DuplicateCommand(String),

    #[error("invalid command name: {0:?}")]
    InvalidName(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("flag {flag} already declared on command {command}")]
    DuplicateFlag { command: String, flag: String },

    #[error("flag {flag} on command {command} collides with a global option")]
    ReservedFlag { command: String, flag: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

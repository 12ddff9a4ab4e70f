//! Error conversion helpers for process I/O
//!
//! Provides extension traits for cleaner error handling with program context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::ExternalCall;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attribute a spawn failure to the program that could not be started.
    ///
    /// # Example
    /// ```ignore
    /// runner.run(&call).with_program_context(&call)?;
    /// ```
    fn with_program_context(self, call: &ExternalCall) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_program_context(self, call: &ExternalCall) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Spawn {
            program: call.program.display().to_string(),
            source: e,
        })
    }
}

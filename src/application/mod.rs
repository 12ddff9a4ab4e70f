//! Application layer: services and use cases
//!
//! This layer orchestrates external tools and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod process;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use process::{run_checked, run_status};

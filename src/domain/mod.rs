//! Domain layer: command registry and entities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod registry;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use registry::{CommandSpec, Operation, Registry};

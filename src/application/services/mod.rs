//! Application services
//!
//! Concrete service implementations that orchestrate external tools.
//! Services depend on the CommandRunner I/O boundary trait
//! but are themselves concrete structs, not traits.

mod deps;
mod lint;
mod packaging;

pub use deps::DependencyService;
pub use lint::LintService;
pub use packaging::PackagingService;

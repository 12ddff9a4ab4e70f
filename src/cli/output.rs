//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::error::Error;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print error followed by its chain of causes, one per line.
///
/// Wrapper layers that repeat their inner message are skipped.
pub fn error_chain(err: &(dyn Error + 'static)) {
    error(err);
    let mut last = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if msg != last {
            eprintln!("  {} {}", "caused by:".dimmed(), msg);
            last = msg;
        }
        source = cause.source();
    }
}

//! Domain entities for commands, flags and external calls

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// How a flag consumes tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Takes a string value: `--where foo`, `-w foo`, `--where=foo`
    Value,
    /// Boolean presence flag: `--strict`, `-s`
    Switch,
}

/// Flag declared on exactly one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Long name, without the leading `--`
    pub long: String,
    /// Optional single-character alias, without the leading `-`
    pub short: Option<char>,
    /// Help text shown in `--help`
    pub help: String,
    pub kind: FlagKind,
}

impl Flag {
    /// Flag that takes a string value.
    pub fn value(long: impl Into<String>, short: Option<char>, help: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short,
            help: help.into(),
            kind: FlagKind::Value,
        }
    }

    /// Boolean presence flag.
    pub fn switch(long: impl Into<String>, short: Option<char>, help: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short,
            help: help.into(),
            kind: FlagKind::Switch,
        }
    }
}

/// Value bound to a flag after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Value(String),
    Switch(bool),
}

/// Flag values bound as named parameters for an operation.
///
/// Every declared switch is present (false when not given).
/// A value flag is present only when it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, FlagValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value to a flag name, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: FlagValue) {
        self.values.insert(name.into(), value);
    }

    /// String value of a value flag, if supplied.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether a switch was given.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Switch(true)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// A single invocation of an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCall {
    /// Program path, or a bare name resolved via `PATH`
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory for the child process
    pub cwd: PathBuf,
}

impl ExternalCall {
    pub fn new(program: impl Into<PathBuf>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name for diagnostics (file name only).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl fmt::Display for ExternalCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Returns the input unchanged if expansion fails (e.g. undefined variable).
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

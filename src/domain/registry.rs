//! Command registry: named, documented commands with typed flags
//!
//! The registry is populated once at startup. Validation happens here so
//! declaration defects fail before any user input is looked at.

use std::fmt;

use crate::domain::entities::{Flag, Params};
use crate::domain::error::{DomainError, DomainResult};

/// Long names taken by global options.
pub const RESERVED_LONG_FLAGS: &[&str] = &["help", "version", "verbose", "project-dir", "completions"];

/// Short aliases taken by global options.
pub const RESERVED_SHORT_FLAGS: &[char] = &['h', 'V', 'v', 'C'];

/// Operation bound to a command: runs for effect against a context.
pub type Operation<C, E> = Box<dyn Fn(&C, &Params) -> Result<(), E>>;

/// A registered command.
pub struct CommandSpec<C, E> {
    pub name: String,
    pub about: String,
    pub flags: Vec<Flag>,
    operation: Operation<C, E>,
}

impl<C, E> CommandSpec<C, E> {
    /// Run the operation with bound parameters.
    pub fn invoke(&self, ctx: &C, params: &Params) -> Result<(), E> {
        (self.operation)(ctx, params)
    }

    fn collides(&self, flag: &Flag) -> bool {
        self.flags.iter().any(|f| {
            f.long == flag.long || (flag.short.is_some() && f.short == flag.short)
        })
    }
}

impl<C, E> fmt::Debug for CommandSpec<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Ordered set of commands, keyed by unique name.
pub struct Registry<C, E> {
    commands: Vec<CommandSpec<C, E>>,
}

impl<C, E> Default for Registry<C, E> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<C, E> fmt::Debug for Registry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter()).finish()
    }
}

impl<C, E> Registry<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command.
    ///
    /// # Errors
    /// `DuplicateCommand` if `name` is taken, `InvalidName` if it is empty
    /// or looks like a flag.
    pub fn register<F>(&mut self, name: &str, about: &str, operation: F) -> DomainResult<()>
    where
        F: Fn(&C, &Params) -> Result<(), E> + 'static,
    {
        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(DomainError::InvalidName(name.to_string()));
        }
        if self.get(name).is_some() {
            return Err(DomainError::DuplicateCommand(name.to_string()));
        }
        self.commands.push(CommandSpec {
            name: name.to_string(),
            about: about.to_string(),
            flags: Vec::new(),
            operation: Box::new(operation),
        });
        Ok(())
    }

    /// Attach a flag to a registered command.
    ///
    /// # Errors
    /// `UnknownCommand` if the command is missing, `DuplicateFlag` if the long
    /// name or short alias is already used on that command, `ReservedFlag` if
    /// it shadows a global option.
    pub fn add_flag(&mut self, command: &str, flag: Flag) -> DomainResult<()> {
        if flag.long.is_empty() || flag.long.starts_with('-') {
            return Err(DomainError::InvalidName(flag.long));
        }
        let reserved = RESERVED_LONG_FLAGS.contains(&flag.long.as_str())
            || flag.short.is_some_and(|c| RESERVED_SHORT_FLAGS.contains(&c));
        let spec = self
            .commands
            .iter_mut()
            .find(|c| c.name == command)
            .ok_or_else(|| DomainError::UnknownCommand(command.to_string()))?;
        if reserved {
            return Err(DomainError::ReservedFlag {
                command: command.to_string(),
                flag: flag.long,
            });
        }
        if spec.collides(&flag) {
            return Err(DomainError::DuplicateFlag {
                command: command.to_string(),
                flag: flag.long,
            });
        }
        spec.flags.push(flag);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec<C, E>> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec<C, E>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestRegistry = Registry<(), String>;

    fn noop(_: &(), _: &Params) -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn given_duplicate_name_when_registering_then_fails() {
        let mut registry = TestRegistry::new();
        registry.register("clean", "Remove artifacts", noop).unwrap();

        let result = registry.register("clean", "Again", noop);

        assert_eq!(result, Err(DomainError::DuplicateCommand("clean".into())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn given_flag_for_missing_command_when_adding_then_fails() {
        let mut registry = TestRegistry::new();

        let result = registry.add_flag("lint", Flag::switch("strict", Some('s'), "Strict"));

        assert_eq!(result, Err(DomainError::UnknownCommand("lint".into())));
    }

    #[test]
    fn given_colliding_short_alias_when_adding_then_fails() {
        let mut registry = TestRegistry::new();
        registry.register("lint", "Check style", noop).unwrap();
        registry
            .add_flag("lint", Flag::switch("strict", Some('s'), "Strict"))
            .unwrap();

        let result = registry.add_flag("lint", Flag::value("source", Some('s'), "Source"));

        assert!(matches!(result, Err(DomainError::DuplicateFlag { .. })));
    }

    #[test]
    fn given_reserved_flag_when_adding_then_fails() {
        let mut registry = TestRegistry::new();
        registry.register("lint", "Check style", noop).unwrap();

        let long = registry.add_flag("lint", Flag::switch("verbose", None, "Loud"));
        let short = registry.add_flag("lint", Flag::switch("hush", Some('h'), "Quiet"));

        assert!(matches!(long, Err(DomainError::ReservedFlag { .. })));
        assert!(matches!(short, Err(DomainError::ReservedFlag { .. })));
    }

    #[test]
    fn given_flag_like_name_when_registering_then_fails() {
        let mut registry = TestRegistry::new();

        assert!(registry.register("", "Empty", noop).is_err());
        assert!(registry.register("--lint", "Flag", noop).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn given_commands_when_listing_then_keeps_registration_order() {
        let mut registry = TestRegistry::new();
        for name in ["lint", "pipme", "clean"] {
            registry.register(name, "", noop).unwrap();
        }

        let names: Vec<_> = registry.commands().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["lint", "pipme", "clean"]);
    }
}

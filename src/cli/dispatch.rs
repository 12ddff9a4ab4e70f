//! Command dispatch: turns the registry into a clap command, parses the
//! process arguments, binds flags and runs exactly one operation.

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};
use clap_complete::{generate, Shell};
use tracing::{debug, info};

use crate::cli::args::GlobalArgs;
use crate::cli::error::{CliError, CliResult};
use crate::domain::{CommandSpec, Flag, FlagKind, FlagValue, Params, Registry};

pub const BIN_NAME: &str = "devtask";

const ABOUT: &str = "Run development tasks: lint, build and release Python packages";

/// Parsed process arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Selected command; None when only global options were given
    pub command: Option<String>,
    pub params: Params,
    pub globals: GlobalArgs,
}

/// Owns the frozen registry and runs commands from it.
pub struct Dispatcher<C, E> {
    registry: Registry<C, E>,
}

impl<C, E> Dispatcher<C, E>
where
    E: Into<CliError>,
{
    pub fn new(registry: Registry<C, E>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry<C, E> {
        &self.registry
    }

    /// Clap command tree: global options plus one subcommand per registered command.
    pub fn command(&self) -> Command {
        let root = Command::new(BIN_NAME)
            .about(ABOUT)
            .version(env!("CARGO_PKG_VERSION"))
            .propagate_version(true);
        let root = GlobalArgs::augment_args(root);

        self.registry.commands().fold(root, |root, spec| {
            let sub = spec
                .flags
                .iter()
                .fold(Command::new(spec.name.clone()).about(spec.about.clone()), |sub, flag| {
                    sub.arg(flag_arg(flag))
                });
            root.subcommand(sub)
        })
    }

    /// Parse the full process argument vector (program name first).
    ///
    /// # Errors
    /// `CliError::Parse` for unknown commands, unknown flags, missing flag
    /// values, and help/version requests.
    pub fn parse<I, T>(&self, argv: I) -> CliResult<Invocation>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        let globals = GlobalArgs::from_arg_matches(&matches)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Ok(Invocation {
                command: None,
                params: Params::new(),
                globals,
            });
        };
        let spec = self.spec(name)?;
        let params = bind_params(spec, sub_matches);
        debug!("parse: command={} params={:?}", name, params);

        Ok(Invocation {
            command: Some(name.to_string()),
            params,
            globals,
        })
    }

    /// Run the operation selected by `invocation` against `ctx`.
    pub fn dispatch(&self, ctx: &C, invocation: &Invocation) -> CliResult<()> {
        let Some(name) = invocation.command.as_deref() else {
            return Err(self.missing_command());
        };
        let spec = self.spec(name)?;
        info!("run: {}", name);
        spec.invoke(ctx, &invocation.params).map_err(Into::into)
    }

    /// Parse `argv` and dispatch it.
    pub fn run<I, T>(&self, ctx: &C, argv: I) -> CliResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let invocation = self.parse(argv)?;
        self.dispatch(ctx, &invocation)
    }

    /// Write a completion script for `shell`.
    pub fn write_completions(&self, shell: Shell, out: &mut dyn Write) {
        let mut cmd = self.command();
        generate(shell, &mut cmd, BIN_NAME, out);
    }

    fn spec(&self, name: &str) -> CliResult<&CommandSpec<C, E>> {
        self.registry
            .get(name)
            .ok_or_else(|| CliError::Usage(format!("unknown command: {name}")))
    }

    /// Usage error for an invocation that names no command.
    pub fn missing_command(&self) -> CliError {
        let mut cmd = self.command();
        CliError::Parse(cmd.error(
            ErrorKind::MissingSubcommand,
            "a command is required; see --help",
        ))
    }
}

fn flag_arg(flag: &Flag) -> Arg {
    let arg = Arg::new(flag.long.clone())
        .long(flag.long.clone())
        .help(flag.help.clone());
    let arg = match flag.short {
        Some(c) => arg.short(c),
        None => arg,
    };
    match flag.kind {
        FlagKind::Value => arg
            .action(ArgAction::Set)
            .value_name("VALUE")
            .value_parser(value_parser!(String)),
        FlagKind::Switch => arg.action(ArgAction::SetTrue),
    }
}

fn bind_params<C, E>(spec: &CommandSpec<C, E>, matches: &ArgMatches) -> Params {
    let mut params = Params::new();
    for flag in &spec.flags {
        match flag.kind {
            FlagKind::Switch => {
                params.insert(flag.long.clone(), FlagValue::Switch(matches.get_flag(&flag.long)));
            }
            FlagKind::Value => {
                if let Some(value) = matches.get_one::<String>(&flag.long) {
                    params.insert(flag.long.clone(), FlagValue::Value(value.clone()));
                }
            }
        }
    }
    params
}

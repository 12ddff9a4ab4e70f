use std::io;
use std::process;

use devtask::cli::dispatch::Dispatcher;
use devtask::cli::{build_registry, output, CliError, CliResult};
use devtask::config::Settings;
use devtask::exitcode;
use devtask::infrastructure::di::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let code = match run() {
        Ok(()) => exitcode::OK,
        Err(e) => report(&e),
    };
    process::exit(code);
}

fn run() -> CliResult<()> {
    // Declarations are checked before any user input is parsed
    let dispatcher = Dispatcher::new(build_registry()?);
    let invocation = dispatcher.parse(std::env::args_os())?;

    setup_logging(invocation.globals.verbose);

    if let Some(shell) = invocation.globals.completions {
        eprintln!("Generating completion file for {shell:?}...");
        dispatcher.write_completions(shell, &mut io::stdout());
        return Ok(());
    }
    if invocation.command.is_none() {
        return Err(dispatcher.missing_command());
    }

    let project_dir = invocation.globals.resolve_project_dir()?;
    tracing::debug!("project_dir: {}", project_dir.display());
    let settings = Settings::load(&project_dir)?;
    let container = ServiceContainer::new(settings);

    dispatcher.dispatch(&container, &invocation)
}

/// Print the error and return the exit code it maps to.
fn report(e: &CliError) -> i32 {
    match e {
        CliError::Parse(err) => {
            let _ = err.print();
        }
        _ => output::error_chain(e),
    }
    e.exit_code()
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::ExternalCall;
use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::ENTER)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Command runner double that records calls and returns scripted exit codes.
///
/// Programs are matched by file name, so `/p/helpers/clean` matches `"clean"`.
/// Unscripted programs exit 0.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<ExternalCall>>,
    exit_codes: HashMap<String, i32>,
    missing: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every run of `program` exit with `code`.
    pub fn with_exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Make `program` fail to start, as if it were not installed.
    pub fn with_missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<ExternalCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Program names of calls made so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls().iter().map(ExternalCall::program_name).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, call: &ExternalCall) -> io::Result<i32> {
        let name = call.program_name();
        if self.missing.contains(&name) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{name}: not found"),
            ));
        }
        self.calls.lock().unwrap().push(call.clone());
        Ok(self.exit_codes.get(&name).copied().unwrap_or(0))
    }
}

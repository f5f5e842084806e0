//! Entry point shared by every runner binary.
//!
//! Parses the command line, bootstraps the registry, resolves selectors and
//! hands the result to the [`Runner`]. Usage, registry and selection errors
//! are rendered as `miette` reports on stderr; all of them exit 1.

pub mod args;

use std::ffi::OsString;
use std::process::ExitCode;

use miette::IntoDiagnostic;
use tracing::{debug, warn};

use crate::registry::Registry;
use crate::runner::Runner;
use crate::select::{parse_selectors, select};

use self::args::{Invocation, RunnerArgs};

/// Runs the process's own command line. See [`crate::srtest_main`].
pub fn main() -> ExitCode {
    ExitCode::from(run_with_args(std::env::args_os()))
}

/// Runs a command line (program name first) and returns the exit status.
pub fn run_with_args<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let invocation = match args::parse(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            let report = miette::Report::new(err);
            eprintln!("{report:?}");
            return 1;
        }
    };
    match invocation {
        Invocation::Usage => {
            eprintln!("{}", args::usage());
            1
        }
        Invocation::Run(args) => {
            init_logging(&args);
            match run(&args) {
                Ok(status) => status,
                Err(report) => {
                    eprintln!("{report:?}");
                    1
                }
            }
        }
    }
}

fn init_logging(args: &RunnerArgs) {
    // Fails if a global subscriber is already set; that one stays.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .with_target(false)
        .try_init();
}

fn run(args: &RunnerArgs) -> miette::Result<u8> {
    let selectors = parse_selectors(&args.selectors)?;
    let registry = Registry::instance()?;
    for name in registry.duplicate_names() {
        warn!(test = %name, "test name registered more than once in the same file");
    }
    let tests = select(registry, &selectors)?;
    debug!(registered = registry.len(), selected = tests.len(), "selection resolved");

    let config = args.config();
    let mut runner = Runner::new(config.stream());
    runner
        .header(registry.len(), tests.len())
        .into_diagnostic()?;
    if config.list_only {
        runner.list(&tests).into_diagnostic()?;
        return Ok(0);
    }
    let summary = runner.run(&tests).into_diagnostic()?;
    Ok(summary.exit_status())
}

//! Command-line arguments for runner binaries.
//!
//! `clap`'s built-in help and version flags are disabled: help goes to stderr
//! and exits 1, and every parse failure is turned into a [`UsageError`].

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use termcolor::ColorChoice;
use tracing::level_filters::LevelFilter;

use crate::errors::UsageError;
use crate::runner::RunnerConfig;

pub const TEST_PATH_HINT: &str = "Test paths are in the form: path/to/dir/source_file:test_name";

#[derive(Debug, Parser)]
#[command(
    name = "srtest",
    about = "Run statically registered tests",
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = TEST_PATH_HINT
)]
pub struct RunnerArgs {
    /// Print this usage text
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// List the selected tests instead of running them
    #[arg(short, long)]
    pub list: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// When to color the report
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,

    /// Directories, source files or `file:test` names to run
    #[arg(value_name = "TEST_PATH")]
    pub selectors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorChoice {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorChoice::Auto,
            ColorWhen::Always => ColorChoice::Always,
            ColorWhen::Never => ColorChoice::Never,
        }
    }
}

impl RunnerArgs {
    pub fn config(&self) -> RunnerConfig {
        RunnerConfig {
            color: self.color.into(),
            list_only: self.list,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// What the command line asks for.
#[derive(Debug)]
pub enum Invocation {
    Usage,
    Run(RunnerArgs),
}

/// Parses `args`, program name first.
pub fn parse<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Ok(Invocation::Usage);
    }
    let parsed = RunnerArgs::try_parse_from(args).map_err(usage_error)?;
    if parsed.help {
        return Ok(Invocation::Usage);
    }
    if parsed.selectors.is_empty() {
        return Err(UsageError::NoSelectors);
    }
    Ok(Invocation::Run(parsed))
}

pub fn usage() -> String {
    RunnerArgs::command().render_help().to_string()
}

fn usage_error(err: clap::Error) -> UsageError {
    let arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.clone()),
        _ => None,
    };
    match (err.kind(), arg) {
        (ErrorKind::UnknownArgument, Some(arg)) => UsageError::InvalidOption(arg),
        (kind, arg) => UsageError::InvalidValue {
            flag: arg.unwrap_or_else(|| "arguments".to_string()),
            reason: kind.as_str().unwrap_or("invalid arguments").to_string(),
        },
    }
}

//! Errors raised outside of test bodies.
//!
//! Everything a test body can raise lives in [`crate::assert`]; the types here
//! cover the process around the tests: building the registry, validating the
//! command line and resolving selectors. Each one is a `miette` diagnostic so
//! the CLI can render it with a code and a hint.

use miette::Diagnostic;
use thiserror::Error;

/// Problems detected while collecting registrations into a [`crate::Registry`].
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tests `{first}` and `{second}` are both registered at {file}:{line}")]
    #[diagnostic(
        code(srtest::registry::duplicate_location),
        help("declare each test on its own line")
    )]
    DuplicateLocation {
        file: String,
        line: u32,
        first: String,
        second: String,
    },
}

/// Malformed or absent command-line arguments.
///
/// Detected before any test executes and never counted as a test failure.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("no test paths were given")]
    #[diagnostic(
        code(srtest::usage::no_selectors),
        help("pass at least one selector such as `src/module` or `src/module:test_name`")
    )]
    NoSelectors,

    #[error("\"{0}\" is not a valid option")]
    #[diagnostic(code(srtest::usage::invalid_option), help("run with --help to see the options"))]
    InvalidOption(String),

    #[error("invalid value for `{flag}`: {reason}")]
    #[diagnostic(code(srtest::usage::invalid_value))]
    InvalidValue { flag: String, reason: String },

    #[error("\"{0}\" is not a valid test path: {1}")]
    #[diagnostic(
        code(srtest::usage::invalid_selector),
        help("test paths look like path/to/dir/source_file:test_name (no extension)")
    )]
    InvalidSelector(String, &'static str),
}

/// Failures turning parsed selectors into a list of tests.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),

    #[error("no registered tests matched {}", .selectors.join(", "))]
    #[diagnostic(
        code(srtest::select::empty),
        help("paths are relative to the repository root and omit the `.rs` extension")
    )]
    Empty { selectors: Vec<String> },
}

//! Expectations about whether a piece of code raises.
//!
//! A closure "throws" when it returns `Err` or panics. Panics are caught at
//! this boundary so the enclosing test keeps control of its own outcome.

use std::any::type_name;
use std::error::Error;

use super::failure::{catch_quietly, panic_message, Location, TestFailure};

type BoxedError = Box<dyn Error + Send + Sync>;

/// What a closure under test did instead of returning `Ok`.
enum Raised {
    Error { type_name: &'static str, error: BoxedError },
    Panic(String),
    Unknown,
}

impl Raised {
    fn describe(&self) -> String {
        match self {
            Raised::Error { type_name, error } => format!("threw {type_name}: {error}"),
            Raised::Panic(message) => format!("panicked: {message}"),
            Raised::Unknown => "panicked with a value of unknown type".to_string(),
        }
    }
}

fn invoke<T, E, F>(f: F) -> Result<T, Raised>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxedError>,
{
    match catch_quietly(f) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Raised::Error {
            type_name: type_name::<E>(),
            error: err.into(),
        }),
        Err(payload) => Err(match panic_message(payload.as_ref()) {
            Some(message) => Raised::Panic(message),
            None => Raised::Unknown,
        }),
    }
}

/// Succeeds only if `f` returns an error whose concrete type is `Expected`.
///
/// Boxed errors are looked through, so a `Box<dyn Error + Send + Sync>`
/// holding an `Expected` matches.
pub fn require_throw_at<Expected, T, E, F>(
    f: F,
    expr: &str,
    location: Location,
) -> Result<(), TestFailure>
where
    Expected: Error + 'static,
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxedError>,
{
    let expected = type_name::<Expected>();
    match invoke(f) {
        Ok(_) => Err(TestFailure::new(
            format!("`{expr}` did not throw (expected {expected})"),
            location,
        )),
        Err(Raised::Error { error, .. }) if error.is::<Expected>() => Ok(()),
        Err(raised) => Err(TestFailure::new(
            format!("`{expr}` {} (expected {expected})", raised.describe()),
            location,
        )),
    }
}

/// Succeeds if `f` returns an error or panics.
pub fn require_throw_any_at<T, E, F>(f: F, expr: &str, location: Location) -> Result<(), TestFailure>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxedError>,
{
    match invoke(f) {
        Ok(_) => Err(TestFailure::new(format!("`{expr}` did not throw"), location)),
        Err(_) => Ok(()),
    }
}

/// Succeeds with the closure's value if it neither errors nor panics.
pub fn require_no_throw_at<T, E, F>(f: F, expr: &str, location: Location) -> Result<T, TestFailure>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxedError>,
{
    invoke(f).map_err(|raised| TestFailure::new(format!("`{expr}` {}", raised.describe()), location))
}

use std::any::{type_name, Any};
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;

/// Fallback type name when a raised value carries no usable type information.
pub const UNKNOWN_TYPE: &str = "unknown type";

/// What every test body and assertion helper returns.
pub type TestResult<T = ()> = Result<T, TestError>;

/// A source position captured at the call site of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// Location of whoever called the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Self::new(caller.file(), caller.line(), caller.column())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The distinguished failure signal raised by every assertion.
///
/// It does not implement [`std::error::Error`] on purpose: that keeps the
/// blanket conversion of arbitrary errors into [`TestError::Uncaught`] from
/// swallowing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    pub message: String,
    pub location: Location,
}

impl TestFailure {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "Test failure at {}", self.location)
        } else {
            write!(f, "Test failure at {}: {}", self.location, self.message)
        }
    }
}

/// Anything a test body can return instead of `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// An expectation checked by the test was false.
    Failure(TestFailure),
    /// Some other error escaped the test body through `?`.
    Uncaught { type_name: String, message: String },
}

impl TestError {
    pub fn uncaught(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Uncaught {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Wraps a type-erased error whose concrete type is no longer known.
    pub fn from_boxed(err: Box<dyn Error + Send + Sync>) -> Self {
        Self::uncaught(UNKNOWN_TYPE, err.to_string())
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::Failure(failure) => failure.fmt(f),
            TestError::Uncaught { type_name, message } => write!(f, "{type_name}: {message}"),
        }
    }
}

impl From<TestFailure> for TestError {
    fn from(failure: TestFailure) -> Self {
        TestError::Failure(failure)
    }
}

impl<E> From<E> for TestError
where
    E: Error + 'static,
{
    fn from(err: E) -> Self {
        TestError::uncaught(type_name::<E>(), err.to_string())
    }
}

/// Text of a panic payload, if it was raised with a string message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return Some((*s).to_string());
    }
    payload.downcast_ref::<String>().cloned()
}

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Runs `f`, catching any panic without the panic hook printing it.
///
/// The hook is wrapped once per process; panics on threads that are not
/// inside this function still reach the previous hook.
pub(crate) fn catch_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if QUIET_DEPTH.try_with(Cell::get).unwrap_or(0) == 0 {
                previous(info);
            }
        }));
    });
    QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = catch_unwind(AssertUnwindSafe(f));
    QUIET_DEPTH.with(|depth| depth.set(depth.get() - 1));
    result
}

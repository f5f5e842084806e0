use std::time::{Duration, Instant};

use tracing::trace;

use crate::assert::{
    catch_quietly, panic_message, reset_messages, take_messages, Location, Message, TestError,
};
use crate::case::TestCase;

/// Type name reported for panics that carried a string message.
pub const PANIC_TYPE: &str = "panic";

/// How a single test ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// An expectation checked by the test was false.
    AssertionFailure { message: String, location: Location },
    /// Some other error escaped the body, or it panicked with a message.
    UncaughtException { type_name: String, message: String },
    /// It panicked with a payload nothing is known about.
    UnknownFault,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Everything the runner knows about one finished test.
#[derive(Debug, Clone)]
pub struct TestReport {
    pub outcome: Outcome,
    pub elapsed: Duration,
    /// Diagnostic messages to show for this outcome, in emission order.
    pub messages: Vec<Message>,
}

/// Runs one test, absorbing anything it raises.
///
/// The per-thread message buffer is cleared first so nothing from an earlier
/// test leaks into this report.
pub fn execute(test: &TestCase) -> TestReport {
    reset_messages();
    trace!(test = %test.qualified_name(), "running");
    let start = Instant::now();
    let result = catch_quietly(|| test.run());
    let elapsed = start.elapsed();

    let outcome = match result {
        Ok(Ok(())) => Outcome::Success,
        Ok(Err(TestError::Failure(failure))) => Outcome::AssertionFailure {
            message: failure.message,
            location: failure.location,
        },
        Ok(Err(TestError::Uncaught { type_name, message })) => {
            Outcome::UncaughtException { type_name, message }
        }
        Err(payload) => match panic_message(payload.as_ref()) {
            Some(message) => Outcome::UncaughtException {
                type_name: PANIC_TYPE.to_string(),
                message,
            },
            None => Outcome::UnknownFault,
        },
    };
    let messages = take_messages(!outcome.is_success());
    trace!(test = %test.qualified_name(), ?elapsed, success = outcome.is_success(), "finished");
    TestReport {
        outcome,
        elapsed,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert::{message_always, message_on_failure, TestResult, UNKNOWN_TYPE};
    use crate::case::Category;

    fn case(entry: fn() -> TestResult) -> TestCase {
        TestCase::new(Box::new(entry), "t", "src/t.rs", 1, Category::Fast)
    }

    fn passes() -> TestResult {
        message_on_failure("hidden");
        message_always("shown");
        Ok(())
    }

    fn fails() -> TestResult {
        message_on_failure("context");
        crate::require!(2 + 2 == 5);
        Ok(())
    }

    fn errors() -> TestResult {
        Err(TestError::uncaught(UNKNOWN_TYPE, "lost"))
    }

    fn panics() -> TestResult {
        panic!("index out of range");
    }

    fn panics_with_value() -> TestResult {
        std::panic::panic_any(17_i64);
    }

    #[test]
    fn test_success_keeps_always_messages() {
        let report = execute(&case(passes));
        assert_eq!(report.outcome, Outcome::Success);
        let texts: Vec<_> = report.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["shown"]);
    }

    #[test]
    fn test_assertion_failure_is_classified() {
        let report = execute(&case(fails));
        match report.outcome {
            Outcome::AssertionFailure { message, location } => {
                assert_eq!(message, "requirement `2 + 2 == 5` failed");
                assert!(location.file.ends_with("outcome.rs"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(report.messages.len(), 1);
    }

    #[test]
    fn test_uncaught_error_is_classified() {
        let report = execute(&case(errors));
        assert_eq!(
            report.outcome,
            Outcome::UncaughtException {
                type_name: UNKNOWN_TYPE.to_string(),
                message: "lost".to_string()
            }
        );
    }

    #[test]
    fn test_panics_are_absorbed() {
        let report = execute(&case(panics));
        assert_eq!(
            report.outcome,
            Outcome::UncaughtException {
                type_name: PANIC_TYPE.to_string(),
                message: "index out of range".to_string()
            }
        );
        assert_eq!(execute(&case(panics_with_value)).outcome, Outcome::UnknownFault);
    }

    #[test]
    fn test_buffer_is_reset_between_tests() {
        message_on_failure("left over from elsewhere");
        let report = execute(&case(errors));
        assert!(report.messages.is_empty());
    }
}

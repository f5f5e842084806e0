//! Registration and assertion macros.
//!
//! # Declaring tests
//!
//! ```ignore
//! use srtest::{require, require_eq, test_fast, test_slow};
//!
//! test_fast! {
//!     fn addition() {
//!         require_eq!(2 + 2, 4);
//!     }
//! }
//!
//! test_slow! {
//!     fn exhaustive_search() {
//!         require!((0..1_000_000u64).sum::<u64>() > 0);
//!     }
//! }
//! ```
//!
//! Each declaration defines an ordinary function returning
//! [`TestResult`](crate::TestResult) and submits a
//! [`Registration`](crate::Registration) carrying `file!()` and `line!()` of
//! the declaration. The body may use `?` on any error type and may `return`
//! early with `Ok(())`.
//!
//! # Runner binaries
//!
//! A crate that collects tests into a binary ends its `main.rs` with
//! [`srtest_main!`](crate::srtest_main).

/// Declares a FAST test. Alias of [`test_fast!`].
#[macro_export]
macro_rules! test_create {
    ($(#[$meta:meta])* fn $name:ident() $body:block) => {
        $crate::__srtest_register! { Fast, $(#[$meta])* fn $name() $body }
    };
}

/// Declares a test in the FAST category.
#[macro_export]
macro_rules! test_fast {
    ($(#[$meta:meta])* fn $name:ident() $body:block) => {
        $crate::__srtest_register! { Fast, $(#[$meta])* fn $name() $body }
    };
}

/// Declares a test in the SLOW category.
#[macro_export]
macro_rules! test_slow {
    ($(#[$meta:meta])* fn $name:ident() $body:block) => {
        $crate::__srtest_register! { Slow, $(#[$meta])* fn $name() $body }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __srtest_register {
    ($category:ident, $(#[$meta:meta])* fn $name:ident() $body:block) => {
        $(#[$meta])*
        #[allow(unreachable_code)]
        fn $name() -> $crate::TestResult {
            $body
            ::std::result::Result::Ok(())
        }

        $crate::inventory::submit! {
            $crate::Registration::new(
                ::std::stringify!($name),
                ::std::file!(),
                ::std::line!(),
                $crate::Category::$category,
                $name,
            )
        }
    };
}

/// Expands to `fn main()` for a test-runner binary.
#[macro_export]
macro_rules! srtest_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::cli::main()
        }
    };
}

/// The [`Location`](crate::Location) of the macro invocation.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(::std::file!(), ::std::line!(), ::std::column!())
    };
}

/// Requires a condition to be true. An optional format string adds context.
#[macro_export]
macro_rules! require {
    ($cond:expr $(,)?) => {
        $crate::assert::require_condition_at(
            $cond,
            ::std::concat!("requirement `", ::std::stringify!($cond), "` failed"),
            $crate::location!(),
        )?
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::assert::require_condition_at(
            $cond,
            ::std::format!(
                "requirement `{}` failed: {}",
                ::std::stringify!($cond),
                ::std::format_args!($($arg)+)
            ),
            $crate::location!(),
        )?
    };
}

/// Requires a condition to be true, with a message expression.
#[macro_export]
macro_rules! require_msg {
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::assert::require_condition_at($cond, $msg, $crate::location!())?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __srtest_compare {
    ($check:ident, $op:ident, $lhs:expr, $rhs:expr) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::assert::$check(
                $crate::assert::CompareOp::$op,
                lhs,
                rhs,
                ::std::stringify!($lhs),
                ::std::stringify!($rhs),
                $crate::location!(),
            )?,
        }
    };
}

/// Requires `lhs == rhs`.
#[macro_export]
macro_rules! require_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_equality_at, Eq, $lhs, $rhs)
    };
}

/// Requires `lhs != rhs`.
#[macro_export]
macro_rules! require_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_equality_at, Ne, $lhs, $rhs)
    };
}

/// Requires `lhs < rhs`.
#[macro_export]
macro_rules! require_lt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_ordering_at, Lt, $lhs, $rhs)
    };
}

/// Requires `lhs <= rhs`.
#[macro_export]
macro_rules! require_le {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_ordering_at, Le, $lhs, $rhs)
    };
}

/// Requires `lhs > rhs`.
#[macro_export]
macro_rules! require_gt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_ordering_at, Gt, $lhs, $rhs)
    };
}

/// Requires `lhs >= rhs`.
#[macro_export]
macro_rules! require_ge {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__srtest_compare!(require_ordering_at, Ge, $lhs, $rhs)
    };
}

/// Requires `|actual - expected| <= bound`. Use near zero.
#[macro_export]
macro_rules! require_near_eq_abs {
    ($actual:expr, $expected:expr, $bound:expr $(,)?) => {
        $crate::assert::require_near_eq_abs_at(
            $actual,
            $expected,
            $bound,
            $crate::assert::NearExprs {
                actual: ::std::stringify!($actual),
                expected: ::std::stringify!($expected),
                bound: ::std::stringify!($bound),
            },
            $crate::location!(),
        )?
    };
}

/// Requires `|actual - expected| / |expected| <= bound`. Use away from zero.
#[macro_export]
macro_rules! require_near_eq_rel {
    ($actual:expr, $expected:expr, $bound:expr $(,)?) => {
        $crate::assert::require_near_eq_rel_at(
            $actual,
            $expected,
            $bound,
            $crate::assert::NearExprs {
                actual: ::std::stringify!($actual),
                expected: ::std::stringify!($expected),
                bound: ::std::stringify!($bound),
            },
            $crate::location!(),
        )?
    };
}

/// Requires the closure to return an error of exactly the given type.
///
/// `require_throw!(ParseIntError, || "x".parse::<i32>())`
#[macro_export]
macro_rules! require_throw {
    ($expected:ty, $f:expr $(,)?) => {
        $crate::assert::require_throw_at::<$expected, _, _, _>(
            $f,
            ::std::stringify!($f),
            $crate::location!(),
        )?
    };
}

/// Requires the closure to return an error or panic.
#[macro_export]
macro_rules! require_throw_any {
    ($f:expr $(,)?) => {
        $crate::assert::require_throw_any_at($f, ::std::stringify!($f), $crate::location!())?
    };
}

/// Requires the closure to return `Ok`; evaluates to the contained value.
#[macro_export]
macro_rules! require_no_throw {
    ($f:expr $(,)?) => {
        $crate::assert::require_no_throw_at($f, ::std::stringify!($f), $crate::location!())?
    };
}

/// Fails the current test unconditionally.
#[macro_export]
macro_rules! test_failure {
    ($($arg:tt)+) => {
        return ::std::result::Result::Err(::std::convert::From::from(
            $crate::TestFailure::new(::std::format!($($arg)+), $crate::location!()),
        ))
    };
}

/// Attaches text to the current test's report regardless of outcome.
#[macro_export]
macro_rules! test_message_always {
    ($($arg:tt)+) => {
        $crate::assert::message_always(::std::format!($($arg)+))
    };
}

/// Attaches text to the current test's report, shown only if it fails.
#[macro_export]
macro_rules! test_message_failure {
    ($($arg:tt)+) => {
        $crate::assert::message_on_failure(::std::format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::assert::{take_messages, TestError, TestResult};
    use std::num::ParseIntError;

    fn failure_message(result: TestResult) -> String {
        match result {
            Err(TestError::Failure(failure)) => failure.message,
            other => panic!("expected a test failure, got {other:?}"),
        }
    }

    fn checks_sum() -> TestResult {
        require!(2 + 2 == 5);
        Ok(())
    }

    fn checks_with_context(x: i32) -> TestResult {
        require!(x > 10, "x was {}", x);
        Ok(())
    }

    fn nested_helper() -> Result<(), crate::TestFailure> {
        require_eq!(vec![1, 2], vec![1, 3]);
        Ok(())
    }

    fn calls_nested_helper() -> TestResult {
        nested_helper()?;
        unreachable!("the helper failure returns before this line");
    }

    #[test]
    fn test_require_embeds_literal_expression() {
        assert_eq!(failure_message(checks_sum()), "requirement `2 + 2 == 5` failed");
    }

    #[test]
    fn test_require_formats_context() {
        assert_eq!(
            failure_message(checks_with_context(3)),
            "requirement `x > 10` failed: x was 3"
        );
        assert!(checks_with_context(11).is_ok());
    }

    #[test]
    fn test_failure_unwinds_through_helpers() {
        let message = failure_message(calls_nested_helper());
        assert_eq!(
            message,
            "`vec![1, 2] == vec![1, 3]` failed: vec![1, 2] = [1, 2], vec![1, 3] = [1, 3]"
        );
    }

    #[test]
    fn test_comparisons_evaluate_operands_once() {
        fn run() -> TestResult {
            let mut calls = 0;
            let mut next = || {
                calls += 1;
                calls
            };
            require_le!(next(), 1);
            require_eq!(calls, 1);
            require_ge!(3, 3);
            require_ne!("a", "b");
            require_lt!(1.0, 2.0);
            require_gt!('b', 'a');
            Ok(())
        }
        assert!(run().is_ok());
    }

    #[test]
    fn test_location_points_at_invocation() {
        fn run() -> TestResult {
            require_msg!(false, "always");
            Ok(())
        }
        match run() {
            Err(TestError::Failure(failure)) => {
                assert!(failure.location.file.ends_with("macros.rs"));
                assert_eq!(failure.message, "always");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_near_equality_macros() {
        fn run(bound: f64) -> TestResult {
            require_near_eq_abs!(0.30000000000000004, 0.3, bound);
            require_near_eq_rel!(100.0 + 1e-12, 100.0, 1e-12);
            Ok(())
        }
        assert!(run(1e-10).is_ok());
        let message = failure_message(run(1e-17));
        assert!(message.contains("`0.30000000000000004` vs `0.3` exceeds `bound`"));
        assert!(message.contains("actual = 0.30000000000000004"));
        assert!(message.contains("error = 5.551115123125783e-17"));
    }

    #[test]
    fn test_throw_macros() {
        fn run() -> TestResult {
            require_throw!(ParseIntError, || "x".parse::<i32>());
            require_throw_any!(|| "y".parse::<u8>());
            let value = require_no_throw!(|| "42".parse::<u8>());
            require_eq!(value, 42);
            Ok(())
        }
        assert!(run().is_ok());
    }

    #[test]
    fn test_failure_macro_and_messages() {
        fn run() -> TestResult {
            test_message_always!("seed {}", 7);
            test_message_failure!("only on failure");
            test_failure!("gave up after {} tries", 3);
        }
        crate::assert::reset_messages();
        assert_eq!(failure_message(run()), "gave up after 3 tries");
        let texts: Vec<_> = take_messages(true).into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["seed 7", "only on failure"]);
    }
}

use std::fmt::Debug;

use super::failure::{Location, TestFailure};

/// Comparison performed by the `require_eq!` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Fails with `message` at the caller's location when `condition` is false.
#[track_caller]
pub fn require_condition(condition: bool, message: impl Into<String>) -> Result<(), TestFailure> {
    require_condition_at(condition, message, Location::caller())
}

pub fn require_condition_at(
    condition: bool,
    message: impl Into<String>,
    location: Location,
) -> Result<(), TestFailure> {
    if condition {
        Ok(())
    } else {
        Err(TestFailure::new(message, location))
    }
}

/// Builds an unconditional failure.
#[track_caller]
pub fn fail(message: impl Into<String>) -> TestFailure {
    TestFailure::new(message, Location::caller())
}

/// `==` / `!=` check. Other operators need [`require_ordering_at`].
pub fn require_equality_at<L, R>(
    op: CompareOp,
    lhs: &L,
    rhs: &R,
    lhs_expr: &str,
    rhs_expr: &str,
    location: Location,
) -> Result<(), TestFailure>
where
    L: PartialEq<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    let holds = match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
        _ => {
            return Err(TestFailure::new(
                format!("`{}` is not an equality operator", op.symbol()),
                location,
            ))
        }
    };
    require_condition_at(
        holds,
        comparison_message(op, lhs, rhs, lhs_expr, rhs_expr),
        location,
    )
}

pub fn require_ordering_at<L, R>(
    op: CompareOp,
    lhs: &L,
    rhs: &R,
    lhs_expr: &str,
    rhs_expr: &str,
    location: Location,
) -> Result<(), TestFailure>
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    let holds = match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
        CompareOp::Lt => lhs < rhs,
        CompareOp::Le => lhs <= rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Ge => lhs >= rhs,
    };
    require_condition_at(
        holds,
        comparison_message(op, lhs, rhs, lhs_expr, rhs_expr),
        location,
    )
}

fn comparison_message<L, R>(op: CompareOp, lhs: &L, rhs: &R, lhs_expr: &str, rhs_expr: &str) -> String
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
{
    format!(
        "`{lhs_expr} {} {rhs_expr}` failed: {lhs_expr} = {lhs:?}, {rhs_expr} = {rhs:?}",
        op.symbol()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Location = Location::new("src/assert/require.rs", 1, 1);

    #[test]
    fn test_true_condition_has_no_effect() {
        assert!(require_condition(true, "unused").is_ok());
    }

    #[test]
    fn test_false_condition_carries_message_and_call_site() {
        let failure = require_condition(false, "nope").unwrap_err();
        assert_eq!(failure.message, "nope");
        assert!(failure.location.file.ends_with("require.rs"));
    }

    #[test]
    fn test_fail_converts_into_test_error_at_call_site() {
        fn gives_up() -> crate::TestResult {
            let step: Result<(), TestFailure> = Err(fail("not implemented for this input"));
            step?;
            Ok(())
        }
        match gives_up() {
            Err(crate::TestError::Failure(failure)) => {
                assert_eq!(failure.message, "not implemented for this input");
                assert!(failure.location.file.ends_with("require.rs"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_equality_message_embeds_expressions_and_values() {
        let a = 4;
        let failure = require_equality_at(CompareOp::Eq, &(a + 1), &4, "a + 1", "4", HERE).unwrap_err();
        assert_eq!(failure.message, "`a + 1 == 4` failed: a + 1 = 5, 4 = 4");
        assert_eq!(failure.location, HERE);
    }

    #[test]
    fn test_equality_rejects_ordering_operators() {
        let failure = require_equality_at(CompareOp::Lt, &1, &2, "1", "2", HERE).unwrap_err();
        assert!(failure.message.contains("not an equality operator"));
    }

    #[test]
    fn test_ordering_operators() {
        let cases = [
            (CompareOp::Lt, 1, 2, true),
            (CompareOp::Lt, 2, 2, false),
            (CompareOp::Le, 2, 2, true),
            (CompareOp::Gt, 3, 2, true),
            (CompareOp::Ge, 1, 2, false),
            (CompareOp::Ne, 1, 2, true),
        ];
        for (op, lhs, rhs, expected) in cases {
            let result = require_ordering_at(op, &lhs, &rhs, "l", "r", HERE);
            assert_eq!(result.is_ok(), expected, "{lhs} {} {rhs}", op.symbol());
        }
    }

    #[test]
    fn test_unsized_operands() {
        assert!(require_equality_at(CompareOp::Eq, "abc", "abc", "x", "y", HERE).is_ok());
        let failure = require_equality_at(CompareOp::Eq, "abc", "abd", "x", "y", HERE).unwrap_err();
        assert_eq!(failure.message, "`x == y` failed: x = \"abc\", y = \"abd\"");
    }
}

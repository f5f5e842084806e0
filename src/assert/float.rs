//! Floating-point near-equality and exact-value formatting.
//!
//! Two predicates are offered and the caller picks one: absolute error for
//! expected values near zero, relative error elsewhere. Both bounds are
//! inclusive.

use std::fmt::Debug;
use std::ops::{Div, Sub};

use super::failure::{Location, TestFailure};

/// The floating-point types the near-equality checks accept.
pub trait Float: Copy + Debug + PartialOrd + Sub<Output = Self> + Div<Output = Self> {
    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(impl Float for $t {
            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }
        })*
    };
}

impl_float!(f32, f64);

/// Formats `value` so that parsing the text back yields the same bits.
///
/// Uses the shortest round-tripping representation; `-0.0` keeps its sign
/// and very large or small magnitudes switch to exponent notation.
pub fn fp_string<T: Float>(value: T) -> String {
    format!("{value:?}")
}

/// `|actual - expected|`
pub fn abs_error<T: Float>(actual: T, expected: T) -> T {
    (actual - expected).abs()
}

/// `|actual - expected| / |expected|`
pub fn rel_error<T: Float>(actual: T, expected: T) -> T {
    ((actual - expected) / expected).abs()
}

/// `|actual - expected| <= bound`. NaN anywhere makes this false.
pub fn near_eq_abs<T: Float>(actual: T, expected: T, bound: T) -> bool {
    abs_error(actual, expected) <= bound
}

/// `|actual - expected| / |expected| <= bound`. NaN anywhere makes this false.
pub fn near_eq_rel<T: Float>(actual: T, expected: T, bound: T) -> bool {
    rel_error(actual, expected) <= bound
}

/// Literal source text of the three operands of a near-equality check.
#[derive(Debug, Clone, Copy)]
pub struct NearExprs<'a> {
    pub actual: &'a str,
    pub expected: &'a str,
    pub bound: &'a str,
}

pub fn require_near_eq_abs_at<T: Float>(
    actual: T,
    expected: T,
    bound: T,
    exprs: NearExprs<'_>,
    location: Location,
) -> Result<(), TestFailure> {
    if near_eq_abs(actual, expected, bound) {
        return Ok(());
    }
    Err(TestFailure::new(
        near_message("absolute", actual, expected, bound, abs_error(actual, expected), exprs),
        location,
    ))
}

pub fn require_near_eq_rel_at<T: Float>(
    actual: T,
    expected: T,
    bound: T,
    exprs: NearExprs<'_>,
    location: Location,
) -> Result<(), TestFailure> {
    if near_eq_rel(actual, expected, bound) {
        return Ok(());
    }
    Err(TestFailure::new(
        near_message("relative", actual, expected, bound, rel_error(actual, expected), exprs),
        location,
    ))
}

fn near_message<T: Float>(
    kind: &str,
    actual: T,
    expected: T,
    bound: T,
    measured: T,
    exprs: NearExprs<'_>,
) -> String {
    format!(
        "{kind} error of `{}` vs `{}` exceeds `{}`: actual = {}, expected = {}, bound = {}, error = {}",
        exprs.actual,
        exprs.expected,
        exprs.bound,
        fp_string(actual),
        fp_string(expected),
        fp_string(bound),
        fp_string(measured),
    )
}

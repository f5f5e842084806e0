//! Floating point constants and helpers.

use std::convert::Infallible;
use std::num::ParseFloatError;

use srtest::assert::fp_string;
use srtest::{
    require, require_eq, require_near_eq_abs, require_near_eq_rel, require_no_throw,
    require_throw, require_throw_any, test_create, test_fast, test_message_always,
    test_message_failure, test_slow,
};

/// Largest `n` whose factorial fits in a `u64`.
pub const MAX_FACTORIAL: u32 = 20;

/// `n!`, or `None` past [`MAX_FACTORIAL`].
pub const fn factorial(n: u32) -> Option<u64> {
    if n > MAX_FACTORIAL {
        return None;
    }
    let mut acc = 1u64;
    let mut i = 2u64;
    while i <= n as u64 {
        acc *= i;
        i += 1;
    }
    Some(acc)
}

// pi * n / d rounded to the nearest double.
const PI_MULTIPLES: [(i32, i32, f64); 8] = [
    (1, 1, 3.141592653589793),
    (2, 1, 6.283185307179586),
    (1, 2, 1.5707963267948966),
    (3, 2, 4.71238898038469),
    (1, 3, 1.0471975511965979),
    (2, 3, 2.0943951023931955),
    (1, 4, 0.7853981633974483),
    (3, 4, 2.356194490192345),
];

/// `pi * n / d` for the multiples kept in the table.
pub fn pi_multiple(n: i32, d: i32) -> Option<f64> {
    PI_MULTIPLES
        .iter()
        .find(|(tn, td, _)| *tn == n && *td == d)
        .map(|(_, _, value)| *value)
}

/// The `index`th table entry. Panics past the end of the table.
pub fn pi_multiple_at(index: usize) -> f64 {
    PI_MULTIPLES[index].2
}

/// Parses a decimal number, ignoring surrounding whitespace.
pub fn parse_fp(text: &str) -> Result<f64, ParseFloatError> {
    text.trim().parse()
}

test_fast! {
    fn factorial_table() {
        require_eq!(factorial(0), Some(1));
        require_eq!(factorial(1), Some(1));
        require_eq!(factorial(5), Some(120));
        require_eq!(factorial(13), Some(6_227_020_800));
        require_eq!(factorial(20), Some(2_432_902_008_176_640_000u64));
        require_eq!(factorial(21), None);
    }
}

test_slow! {
    fn factorial_series_converges_to_e() {
        // Smallest terms first.
        let sum: f64 = (0..=MAX_FACTORIAL)
            .rev()
            .filter_map(factorial)
            .map(|f| 1.0 / f as f64)
            .sum();
        test_message_failure!("partial sum was {}", fp_string(sum));
        require_near_eq_rel!(sum, std::f64::consts::E, 8.0 * f64::EPSILON);
    }
}

test_fast! {
    fn machine_epsilon() {
        require_eq!(f64::EPSILON, 2.220446049250313e-16);
        require_eq!(f32::EPSILON, 1.1920929e-7f32);
        require!(1.0 + f64::EPSILON > 1.0);
        require!(1.0 + f64::EPSILON / 2.0 == 1.0);
    }
}

test_create! {
    fn pi_multiples_match_std() {
        let tol = 2.0 * f64::EPSILON;
        for (n, d, _) in PI_MULTIPLES {
            let expected = std::f64::consts::PI * f64::from(n) / f64::from(d);
            let actual = pi_multiple(n, d);
            require!(actual.is_some(), "missing pi * {}/{}", n, d);
            require_near_eq_rel!(actual.unwrap_or(f64::NAN), expected, tol);
        }
        require_eq!(pi_multiple(5, 7), None);
    }
}

test_fast! {
    fn table_index_out_of_range() {
        require_eq!(pi_multiple_at(0), std::f64::consts::PI);
        require_throw_any!(|| -> Result<f64, Infallible> { Ok(pi_multiple_at(PI_MULTIPLES.len())) });
    }
}

test_fast! {
    fn sin_cos_half_pi_multiples() {
        // Relative error near 1, absolute error near 0.
        let tol = 10.0 * f64::EPSILON;
        test_message_always!("tolerance {}", fp_string(tol));

        let (sin, cos) = 0.0f64.sin_cos();
        require_near_eq_abs!(sin, 0.0, tol);
        require_near_eq_rel!(cos, 1.0, tol);

        let (sin, cos) = std::f64::consts::FRAC_PI_2.sin_cos();
        require_near_eq_rel!(sin, 1.0, tol);
        require_near_eq_abs!(cos, 0.0, tol);

        let (sin, cos) = (-std::f64::consts::FRAC_PI_2).sin_cos();
        require_near_eq_rel!(sin, -1.0, tol);
        require_near_eq_abs!(cos, 0.0, tol);

        let (sin, cos) = std::f64::consts::PI.sin_cos();
        require_near_eq_abs!(sin, 0.0, tol);
        require_near_eq_rel!(cos, -1.0, tol);
    }
}

test_fast! {
    fn sin_cos_single_precision() {
        let tol = 10.0 * f32::EPSILON;
        let (sin, cos) = std::f32::consts::FRAC_PI_2.sin_cos();
        require_near_eq_rel!(sin, 1.0f32, tol);
        require_near_eq_abs!(cos, 0.0f32, tol);
        let (sin, cos) = std::f32::consts::PI.sin_cos();
        require_near_eq_abs!(sin, 0.0f32, tol);
        require_near_eq_rel!(cos, -1.0f32, tol);
    }
}

test_fast! {
    fn fp_string_round_trips() {
        require_eq!(fp_string(0.1f64), "0.1");
        require_eq!(fp_string(0.1f64 + 0.2), "0.30000000000000004");
        for value in [0.1, 1.0 / 3.0, f64::MAX, f64::MIN_POSITIVE, 5e-324, -2.5e300] {
            let back: f64 = fp_string(value).parse()?;
            require_eq!(back.to_bits(), value.to_bits());
        }
        let back: f32 = fp_string(1.0f32 / 3.0).parse()?;
        require_eq!(back, 1.0f32 / 3.0);
    }
}

test_fast! {
    fn parse_fp_errors() {
        require_throw!(ParseFloatError, || parse_fp("pi"));
        require_throw!(ParseFloatError, || parse_fp(""));
        let half = require_no_throw!(|| parse_fp(" 0.5 "));
        require_eq!(half, 0.5);
    }
}

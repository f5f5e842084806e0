//! Tests that fail on purpose, one per outcome class.
//!
//! The runner stops at the first failure, so select these one at a time:
//! `srtest-demo demos/failing:two_plus_two`.

use srtest::{require, require_eq, require_near_eq_abs, test_fast, test_message_failure, test_slow};

test_fast! {
    fn two_plus_two() {
        test_message_failure!("arithmetic is still broken");
        require!(2 + 2 == 5);
    }
}

test_fast! {
    fn float_gap() {
        // 0.1 + 0.2 is one ulp (2^-54) above 0.3.
        require_near_eq_abs!(0.1 + 0.2, 0.3, 1e-10);
        require_near_eq_abs!(0.1 + 0.2, 0.3, 1e-17);
    }
}

test_fast! {
    fn escaped_parse_error() {
        let answer: i32 = "forty-two".parse()?;
        require_eq!(answer, 42);
    }
}

test_fast! {
    fn out_of_bounds() {
        let empty: Vec<u32> = Vec::new();
        require_eq!(empty[3], 0);
    }
}

test_slow! {
    fn opaque_panic() {
        std::panic::panic_any(0xdead_u32);
    }
}

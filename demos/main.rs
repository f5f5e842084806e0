//! Demo runner for SRTest.
//!
//! Links a few small numeric subjects together with their registered tests.
//! Run it with a test path, e.g. `srtest-demo demos/fp_math` or
//! `srtest-demo demos/point_math:dot_manual`.

mod failing;
mod fp_math;
mod point_math;

srtest::srtest_main!();

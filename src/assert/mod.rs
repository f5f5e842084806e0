//! Assertion and reporting library used inside test bodies.
//!
//! Every check returns `Result<_, TestFailure>`; the `require*!` macros apply
//! `?` so a failed expectation unwinds from any depth of helper calls up to
//! the runner's per-test boundary and no further. Nothing here panics or
//! exits the process.
//!
//! ```ignore
//! srtest::test_fast! {
//!     fn sums() {
//!         srtest::require_eq!(2 + 2, 4);
//!         srtest::require_near_eq_rel!(0.1 + 0.2, 0.3, 1e-15);
//!     }
//! }
//! ```

mod failure;
mod float;
mod messages;
mod require;
mod throws;

pub use failure::{Location, TestError, TestFailure, TestResult, UNKNOWN_TYPE};
pub(crate) use failure::{catch_quietly, panic_message};
pub use float::{
    abs_error, fp_string, near_eq_abs, near_eq_rel, rel_error, require_near_eq_abs_at,
    require_near_eq_rel_at, Float, NearExprs,
};
pub use messages::{message_always, message_on_failure, reset_messages, take_messages, Message, MessageKind};
pub use require::{
    fail, require_condition, require_condition_at, require_equality_at, require_ordering_at,
    CompareOp,
};
pub use throws::{require_no_throw_at, require_throw_any_at, require_throw_at};

//! SRTest: a statically registered test library.
//!
//! Tests are declared next to the code they check with [`test_fast!`],
//! [`test_slow!`] or [`test_create!`]. Each declaration registers itself at
//! link time; a runner binary built with [`srtest_main!`] collects every
//! linked test, selects them by `path[:name]` and runs them in (file, line)
//! order.

#[macro_use]
pub mod macros;

pub mod assert;
pub mod case;
pub mod cli;
pub mod errors;
pub mod registry;
pub mod runner;
pub mod select;

pub use crate::assert::{Location, TestError, TestFailure, TestResult};
pub use crate::case::{Category, Registration, TestCase};
pub use crate::errors::{RegistryError, SelectionError, UsageError};
pub use crate::registry::Registry;
pub use crate::runner::{Outcome, RunSummary, Runner, RunnerConfig};
pub use crate::select::{select, Selector};

#[doc(hidden)]
pub use inventory;

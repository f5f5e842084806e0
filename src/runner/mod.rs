//! Executes selected tests in canonical order and reports on them.
//!
//! Each test moves NotStarted → Running → Succeeded | Failed. A failure is
//! fully absorbed at the per-test boundary, then ends the run: the remaining
//! tests are not started. `Runner::run` is the one place a run-all policy
//! would go.

mod outcome;
mod output;

use std::io;

use termcolor::{ColorChoice, StandardStream, WriteColor};
use tracing::{debug, info};

use crate::case::TestCase;

pub use outcome::{execute, Outcome, TestReport, PANIC_TYPE};
pub use output::{timings, ReportWriter, BANNER};

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub num_run: usize,
    pub num_succeeded: usize,
    pub num_failed: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.num_failed > 0
    }

    /// Process exit status: 0 when nothing failed, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_failures())
    }
}

/// Output settings chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub color: ColorChoice,
    /// Print the selection instead of running it.
    pub list_only: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            list_only: false,
        }
    }
}

impl RunnerConfig {
    /// The stderr report stream; `Auto` colors only when stderr is a terminal.
    pub fn stream(&self) -> StandardStream {
        let choice = match self.color {
            ColorChoice::Auto if !atty::is(atty::Stream::Stderr) => ColorChoice::Never,
            other => other,
        };
        StandardStream::stderr(choice)
    }
}

pub struct Runner<W: WriteColor> {
    report: ReportWriter<W>,
}

impl<W: WriteColor> Runner<W> {
    pub fn new(out: W) -> Self {
        Self {
            report: ReportWriter::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.report.into_inner()
    }

    pub fn header(&mut self, registered: usize, selected: usize) -> io::Result<()> {
        self.report.banner(registered, selected)
    }

    /// Prints the tests without running them.
    pub fn list(&mut self, tests: &[&TestCase]) -> io::Result<()> {
        for test in tests {
            self.report.listed(test)?;
        }
        Ok(())
    }

    /// Runs `tests` in the given order, stopping after the first failure.
    pub fn run(&mut self, tests: &[&TestCase]) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for (index, test) in tests.iter().enumerate() {
            self.report.running(test)?;
            let report = execute(test);
            self.report.finished(&report)?;
            summary.num_run += 1;
            if report.outcome.is_success() {
                summary.num_succeeded += 1;
                continue;
            }
            summary.num_failed += 1;
            debug!(test = %test.qualified_name(), outcome = ?report.outcome, "test failed");
            self.report.stopped_early(tests.len() - index - 1)?;
            break;
        }
        info!(
            run = summary.num_run,
            succeeded = summary.num_succeeded,
            failed = summary.num_failed,
            "run finished"
        );
        self.report.summary(&summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert::TestResult;
    use crate::case::Category;
    use crate::registry::Registry;
    use crate::select::{parse_selectors, select};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use termcolor::NoColor;

    static AFTER_FAILURE_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn ok() -> TestResult {
        Ok(())
    }

    fn broken() -> TestResult {
        crate::require!(2 + 2 == 5);
        Ok(())
    }

    fn after_failure() -> TestResult {
        AFTER_FAILURE_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        let entries: [(fn() -> TestResult, &str, u32); 4] = [
            (after_failure, "c_after", 30),
            (ok, "a_ok", 10),
            (broken, "b_broken", 20),
            (ok, "other_ok", 5),
        ];
        for (entry, name, line) in entries {
            let file = if name == "other_ok" { "src/other.rs" } else { "src/unit.rs" };
            registry
                .add_test(Box::new(entry), name, file, line, Category::Fast)
                .unwrap();
        }
        registry
    }

    fn run(selectors: &[&str]) -> (RunSummary, String) {
        let registry = registry();
        let selectors = parse_selectors(selectors).unwrap();
        let tests = select(&registry, &selectors).unwrap();
        let mut runner = Runner::new(NoColor::new(Vec::new()));
        runner.header(registry.len(), tests.len()).unwrap();
        let summary = runner.run(&tests).unwrap();
        let text = String::from_utf8(runner.into_inner().into_inner()).unwrap();
        (summary, text)
    }

    #[test]
    fn test_all_passing_run() {
        let (summary, text) = run(&["src/unit:a_ok", "src/other"]);
        assert_eq!(
            summary,
            RunSummary {
                num_run: 2,
                num_succeeded: 2,
                num_failed: 0
            }
        );
        assert_eq!(summary.exit_status(), 0);
        assert!(text.starts_with(BANNER));
        assert!(text.contains("Found 4 registered tests\nSelected 2 tests to run\n"));
        let first = text.find("Running src/other:other_ok (FAST, line 5)").unwrap();
        let second = text.find("Running src/unit:a_ok (FAST, line 10)").unwrap();
        assert!(first < second);
        assert!(text.contains("Completed running 2 tests\nSuccesses: 2\nFailures: 0\n"));
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let before = AFTER_FAILURE_CALLS.load(Ordering::SeqCst);
        let (summary, text) = run(&["src/unit"]);
        assert_eq!(
            summary,
            RunSummary {
                num_run: 2,
                num_succeeded: 1,
                num_failed: 1
            }
        );
        assert_eq!(summary.exit_status(), 1);
        assert_eq!(AFTER_FAILURE_CALLS.load(Ordering::SeqCst), before);
        assert!(text.contains("Test failure at "));
        assert!(text.contains("requirement `2 + 2 == 5` failed"));
        assert!(text.contains("Stopping at first failure; 1 selected tests not run"));
        assert!(!text.contains("c_after"));
        assert!(text.contains("Failures: 1\n"));
    }

    #[test]
    fn test_list_prints_canonical_order_without_running() {
        let registry = registry();
        let selectors = parse_selectors(&["src"]).unwrap();
        let tests = select(&registry, &selectors).unwrap();
        let before = AFTER_FAILURE_CALLS.load(Ordering::SeqCst);
        let mut runner = Runner::new(NoColor::new(Vec::new()));
        runner.list(&tests).unwrap();
        let text = String::from_utf8(runner.into_inner().into_inner()).unwrap();
        assert_eq!(
            text,
            "src/other:other_ok (FAST, line 5)\n\
             src/unit:a_ok (FAST, line 10)\n\
             src/unit:b_broken (FAST, line 20)\n\
             src/unit:c_after (FAST, line 30)\n"
        );
        assert_eq!(AFTER_FAILURE_CALLS.load(Ordering::SeqCst), before);
    }
}

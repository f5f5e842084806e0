//! Writes the human-readable run report.
//!
//! Everything goes to one `termcolor` stream (stderr in the CLI). Colors are
//! applied per label only, so the uncolored text is identical whatever the
//! color choice.

use std::io;
use std::time::Duration;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::assert::{MessageKind, UNKNOWN_TYPE};
use crate::case::TestCase;

use super::outcome::{Outcome, TestReport};
use super::RunSummary;

pub const BANNER: &str = "SRTest -- Statically Registered Test Library";

/// Renders a duration as whole milliseconds, microseconds and nanoseconds.
pub fn timings(elapsed: Duration) -> String {
    format!(
        "{}ms / {}us / {}ns",
        elapsed.as_millis(),
        elapsed.as_micros(),
        elapsed.as_nanos()
    )
}

pub struct ReportWriter<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn colored(&mut self, color: Color, text: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    pub fn banner(&mut self, registered: usize, selected: usize) -> io::Result<()> {
        self.colored(Color::Blue, BANNER)?;
        writeln!(self.out)?;
        writeln!(self.out, "Found {registered} registered tests")?;
        writeln!(self.out, "Selected {selected} tests to run")
    }

    pub fn running(&mut self, test: &TestCase) -> io::Result<()> {
        self.colored(Color::Blue, "Running")?;
        writeln!(
            self.out,
            " {} ({}, line {})",
            test.qualified_name(),
            test.category(),
            test.line()
        )
    }

    pub fn listed(&mut self, test: &TestCase) -> io::Result<()> {
        writeln!(
            self.out,
            "{} ({}, line {})",
            test.qualified_name(),
            test.category(),
            test.line()
        )
    }

    pub fn finished(&mut self, report: &TestReport) -> io::Result<()> {
        match &report.outcome {
            Outcome::Success => {}
            Outcome::AssertionFailure { message, location } => {
                self.colored(Color::Red, "Test failure")?;
                if message.is_empty() {
                    writeln!(self.out, " at {location}")?;
                } else {
                    writeln!(self.out, " at {location}: {message}")?;
                }
            }
            Outcome::UncaughtException { type_name, message } => {
                let type_name = if type_name.is_empty() {
                    UNKNOWN_TYPE
                } else {
                    type_name
                };
                self.colored(Color::Red, "Test failure")?;
                writeln!(self.out, " ({type_name}): {message}")?;
            }
            Outcome::UnknownFault => {
                self.colored(Color::Red, "Test failure")?;
                writeln!(self.out, " ({UNKNOWN_TYPE})")?;
            }
        }
        for message in &report.messages {
            let label = match message.kind {
                MessageKind::Always => "Message",
                MessageKind::OnFailure => "Failure message",
            };
            self.colored(Color::Yellow, label)?;
            writeln!(self.out, ": {}", message.text)?;
        }
        if report.outcome.is_success() {
            self.colored(Color::Green, "Success")?;
        } else {
            self.colored(Color::Red, "Failure")?;
        }
        writeln!(self.out, " ({})", timings(report.elapsed))
    }

    pub fn stopped_early(&mut self, remaining: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "Stopping at first failure; {remaining} selected tests not run"
        )
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "Completed running {} tests", summary.num_run)?;
        self.colored(Color::Green, "Successes")?;
        writeln!(self.out, ": {}", summary.num_succeeded)?;
        if summary.num_failed > 0 {
            self.colored(Color::Red, "Failures")?;
        } else {
            write!(self.out, "Failures")?;
        }
        writeln!(self.out, ": {}", summary.num_failed)?;
        self.out.flush()
    }
}

//! Streaming report sink and run counters.
//!
//! Every problem, warning and check entry is written as soon as it is
//! discovered. The prefixes are part of the output contract:
//!
//! | Entry    | Prefix         |
//! |----------|----------------|
//! | problem  | `"  \u{274C} "` |
//! | warning  | `"  \u{26A0} "` |
//! | check    | `"- "`         |

use crate::types::{Finding, Summary};

use std::fmt::Display;
use std::io::Write;
use tracing::warn;

/// Prefix for problem lines.
pub const PROBLEM_PREFIX: &str = "  \u{274C} ";
/// Prefix for warning lines.
pub const WARNING_PREFIX: &str = "  \u{26A0} ";
/// Prefix for check lines.
pub const CHECK_PREFIX: &str = "- ";

/// Collects counters and findings for one run and streams them to a writer.
pub struct Reporter<'w> {
    out: &'w mut dyn Write,
    summary: Summary,
    findings: Vec<Finding>,
}

impl<'w> Reporter<'w> {
    /// Creates a reporter writing to `out`, with all counters at zero.
    #[must_use]
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self {
            out,
            summary: Summary::default(),
            findings: Vec::new(),
        }
    }

    /// Reports a structural problem.
    pub fn problem(&mut self, message: impl Into<String>) {
        let finding = Finding::problem(message);
        self.line(format_args!("{PROBLEM_PREFIX}{}", finding.message));
        self.summary.problems += 1;
        self.findings.push(finding);
    }

    /// Reports an advisory warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        let finding = Finding::warning(message);
        self.line(format_args!("{WARNING_PREFIX}{}", finding.message));
        self.summary.warnings += 1;
        self.findings.push(finding);
    }

    /// Reports a check (progress) entry.
    pub fn check(&mut self, message: impl Display) {
        self.line(format_args!("{CHECK_PREFIX}{message}"));
        self.summary.checks += 1;
    }

    /// Writes an unprefixed informational line. Not counted.
    pub fn info(&mut self, message: impl Display) {
        self.line(format_args!("{message}"));
    }

    /// Writes an empty separator line.
    pub fn blank(&mut self) {
        self.line(format_args!(""));
    }

    /// Writes the two summary lines printed once at the end of a run.
    pub fn print_summary(&mut self) {
        let Summary {
            problems, warnings, ..
        } = self.summary;
        self.line(format_args!("problems detected: {problems}"));
        self.line(format_args!("warnings detected: {warnings}"));
    }

    /// Current counters.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Findings reported so far, in emission order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consumes the reporter, returning the final counters and findings.
    #[must_use]
    pub fn finish(self) -> (Summary, Vec<Finding>) {
        (self.summary, self.findings)
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}") {
            warn!("Failed to write report line: {e}");
        }
    }
}

//! Structured output for lint results.

use anyhow::Result;
use konform_core::{Finding, Summary};
use serde::Serialize;
use std::path::Path;

/// JSON document printed by `konform check --format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Root directory that was walked.
    pub root: String,
    /// Number of problems reported.
    pub problems: usize,
    /// Number of warnings reported.
    pub warnings: usize,
    /// Number of check entries reported.
    pub checks: usize,
    /// Problems and warnings in the order they were found.
    pub findings: &'a [Finding],
}

impl<'a> JsonReport<'a> {
    /// Builds the report for a finished run.
    #[must_use]
    pub fn new(root: &Path, summary: &Summary, findings: &'a [Finding]) -> Self {
        Self {
            root: root.display().to_string(),
            problems: summary.problems,
            warnings: summary.warnings,
            checks: summary.checks,
            findings,
        }
    }
}

/// Prints the JSON report to stdout.
pub fn print_json(root: &Path, summary: &Summary, findings: &[Finding]) -> Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::new(root, summary, findings))?;
    println!("{json}");
    Ok(())
}

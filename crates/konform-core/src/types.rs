//! Core types for findings and run summaries.

use serde::{Deserialize, Serialize};

/// Severity level for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding; fails the run with exit code 2 when no problems exist.
    Warning,
    /// Structural problem; always fails the run with exit code 1.
    Problem,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Problem => write!(f, "problem"),
        }
    }
}

/// A problem or warning reported during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message, exactly as printed in the text report.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Creates a problem finding.
    #[must_use]
    pub fn problem(message: impl Into<String>) -> Self {
        Self::new(Severity::Problem, message)
    }

    /// Creates a warning finding.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Final counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of problems reported.
    pub problems: usize,
    /// Number of warnings reported.
    pub warnings: usize,
    /// Number of check entries reported.
    pub checks: usize,
}

impl Summary {
    /// Returns true if at least one problem was reported.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.problems > 0
    }

    /// Returns true if at least one warning was reported.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    /// Process exit code for this summary.
    ///
    /// Problems take precedence over warnings: `1` if any problem was
    /// reported, `2` if only warnings were, `0` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_problems() {
            1
        } else if self.has_warnings() {
            2
        } else {
            0
        }
    }
}

//! Run orchestration: walk the tree, validate each kustomize directory.

use crate::check::{default_checks, CheckBox, ManifestCheck};
use crate::config::Config;
use crate::report::Reporter;
use crate::types::Summary;
use crate::validator::Validator;
use crate::walker::TreeWalker;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that prevent a run from starting or completing.
#[derive(Debug, Error)]
pub enum LintError {
    /// IO error inspecting the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root directory does not exist.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),

    /// The root directory could not be read during the walk.
    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        /// The root being walked.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Invalid exclude pattern.
    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    root: Option<PathBuf>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    checks: Vec<CheckBox>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to lint (default: current directory).
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds a per-manifest check. When none are added, the kind and name
    /// checks are used.
    #[must_use]
    pub fn check<C: ManifestCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing or not a directory, or if an
    /// exclude pattern is invalid.
    pub fn build(self) -> Result<Linter, LintError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));

        match std::fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(LintError::RootNotADirectory(root)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LintError::RootNotFound(root));
            }
            Err(e) => return Err(LintError::Io(e)),
        }

        let config = self.config.unwrap_or_default();
        let exclude = self
            .exclude_patterns
            .iter()
            .chain(&config.walker.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let checks = if self.checks.is_empty() {
            default_checks()
        } else {
            self.checks
        };

        Ok(Linter {
            walker: TreeWalker::new(root)
                .exclude(exclude)
                .follow_links(config.walker.follow_links),
            validator: Validator::new(checks),
        })
    }
}

/// Lints a kustomize tree.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    walker: TreeWalker,
    validator: Validator,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the root directory being linted.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Validates every kustomize directory under the root, then prints the
    /// summary lines.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root itself cannot be read. Findings
    /// are reported through `reporter`, never as errors.
    pub fn run(&self, reporter: &mut Reporter<'_>) -> Result<Summary, LintError> {
        info!(
            "Linting {} with {} manifest checks",
            self.root().display(),
            self.validator.check_count()
        );

        for dir in self.walker.kustomize_dirs() {
            let dir = dir.map_err(|source| LintError::Walk {
                path: self.root().to_path_buf(),
                source,
            })?;
            reporter.info(format_args!("looks like a kustomize dir: {}", dir.display()));
            self.validator.validate_kustomize_dir(&dir, reporter);
            reporter.blank();
        }

        reporter.print_summary();
        let summary = reporter.summary();

        info!(
            "Lint complete: {} problems, {} warnings, {} checks",
            summary.problems, summary.warnings, summary.checks
        );

        Ok(summary)
    }
}

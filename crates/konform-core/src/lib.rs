//! # konform-core
//!
//! Validation engine for directory trees of kustomize overlays.
//!
//! Every directory containing a `kustomization.yaml` is checked for:
//!
//! - manifests under `resources/` and `patches/` named `<name>.<kind>.yaml`
//!   after their `metadata.name` and `kind`
//! - nested `kustomization.yaml` files inside those subdirectories
//! - `secretGenerator` entries without a name or using `literals`
//! - declared resources lying next to the kustomization instead of under
//!   `resources/`, and undeclared files under `resources/`
//!
//! Findings are streamed through a [`Reporter`]; the final [`Summary`]
//! decides the process exit code.
//!
//! ## Example
//!
//! ```no_run
//! use konform_core::{Linter, Reporter};
//!
//! let linter = Linter::builder().root("./deploy").build()?;
//! let mut stdout = std::io::stdout();
//! let mut reporter = Reporter::new(&mut stdout);
//! let summary = linter.run(&mut reporter)?;
//! std::process::exit(summary.exit_code());
//! # Ok::<(), konform_core::LintError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod config;
mod document;
mod linter;
mod report;
mod types;
mod validator;
mod walker;

pub use check::{
    check_secret_generators, default_checks, CheckBox, KindMatchesFilename, ManifestCheck,
    ManifestName, NameMatchesFilename,
};
pub use config::{Config, ConfigError, WalkerConfig};
pub use document::{render, Document, DocumentError};
pub use linter::{LintError, Linter, LinterBuilder};
pub use report::{Reporter, CHECK_PREFIX, PROBLEM_PREFIX, WARNING_PREFIX};
pub use types::{Finding, Severity, Summary};
pub use validator::{
    check_kustomization, Validator, KUSTOMIZATION_FILE, PATCHES_DIR, RESOURCES_DIR,
};
pub use walker::{is_kustomize_dir, TreeWalker};

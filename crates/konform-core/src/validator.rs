//! Validation of a single kustomize directory.

use crate::check::{check_secret_generators, default_checks, CheckBox};
use crate::document::Document;
use crate::report::Reporter;

use std::path::Path;
use tracing::{debug, warn};

/// File name identifying a kustomize directory.
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";
/// Subdirectory holding resource manifests.
pub const RESOURCES_DIR: &str = "resources";
/// Subdirectory holding patch manifests.
pub const PATCHES_DIR: &str = "patches";

const YAML_SUFFIX: &str = ".yaml";

/// Validates kustomize directories and the manifest sets inside them.
pub struct Validator {
    checks: Vec<CheckBox>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(default_checks())
    }
}

impl Validator {
    /// Creates a validator running `checks` against every manifest.
    #[must_use]
    pub fn new(checks: Vec<CheckBox>) -> Self {
        Self { checks }
    }

    /// Returns the number of per-manifest checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Validates one kustomize directory.
    ///
    /// `resources/` and `patches/` are validated first. A missing
    /// `kustomization.yaml` is reported and ends validation of the directory;
    /// otherwise the kustomization is parsed and cross-referenced.
    pub fn validate_kustomize_dir(&self, dir: &Path, reporter: &mut Reporter<'_>) {
        reporter.check(dir.display());
        let manifest = dir.join(KUSTOMIZATION_FILE);

        for sub in [RESOURCES_DIR, PATCHES_DIR] {
            let sub_dir = dir.join(sub);
            if sub_dir.is_dir() {
                self.validate_manifest_set(&sub_dir, reporter);
            }
        }

        if !manifest.exists() {
            reporter.problem(format!("{}: {KUSTOMIZATION_FILE} not found", dir.display()));
            return;
        }

        match Document::from_file(&manifest) {
            Ok(doc) => check_kustomization(&doc, &manifest, dir, reporter),
            Err(e) if e.is_parse_error() => {
                debug!("Failed to parse {}: {e}", manifest.display());
                reporter.problem(format!(
                    "{}: could not parse {KUSTOMIZATION_FILE}",
                    manifest.display()
                ));
            }
            Err(e) => reporter.problem(format!(
                "{}: could not read {KUSTOMIZATION_FILE}: {e}",
                manifest.display()
            )),
        }
    }

    /// Validates every `.yaml` file directly inside `dir`.
    ///
    /// A nested `kustomization.yaml` is reported and skipped. Failure to read
    /// or parse one file is reported and never stops the remaining files.
    pub fn validate_manifest_set(&self, dir: &Path, reporter: &mut Reporter<'_>) {
        reporter.check(dir.display());

        let filenames = match yaml_entries(dir, Entries::FilesOnly) {
            Ok(names) => names,
            Err(e) => {
                warn!("Skipping unreadable directory {}: {e}", dir.display());
                return;
            }
        };

        for filename in filenames {
            if filename == KUSTOMIZATION_FILE {
                reporter.problem(format!(
                    "{}: unexpected {KUSTOMIZATION_FILE}",
                    dir.display()
                ));
                continue;
            }

            let path = dir.join(&filename);
            reporter.check(format_args!("{}:", path.display()));
            match Document::from_file(&path) {
                Ok(doc) => self.check_manifest(&doc, &filename, reporter),
                Err(e) if e.is_parse_error() => {
                    debug!("Failed to parse {}: {e}", path.display());
                    reporter.problem("could not parse manifest");
                }
                Err(e) => reporter.problem(format!("could not read manifest: {e}")),
            }
        }
    }

    /// Runs every per-manifest check against one parsed manifest.
    pub fn check_manifest(&self, doc: &Document, filename: &str, reporter: &mut Reporter<'_>) {
        for check in &self.checks {
            debug!("Running {} on {filename}", check.name());
            check.check(doc, filename, reporter);
        }
    }
}

/// Cross-references a parsed kustomization against its directory.
///
/// Reports `secretGenerator` issues, manifests sitting next to the
/// kustomization that are declared in `resources` (they belong under
/// `resources/`), and manifests under `resources/` that are not declared.
pub fn check_kustomization(
    doc: &Document,
    manifest: &Path,
    dir: &Path,
    reporter: &mut Reporter<'_>,
) {
    reporter.check(manifest.display());

    check_secret_generators(doc, reporter);

    let resources = doc.string_list("resources");
    let declared = |name: &str| resources.iter().any(|r| *r == name);

    match yaml_entries(dir, Entries::All) {
        Ok(names) => {
            for name in names
                .iter()
                .filter(|n| n.as_str() != KUSTOMIZATION_FILE && declared(n.as_str()))
            {
                reporter.problem(format!("resource manifest not in {RESOURCES_DIR}/: {name}"));
            }
        }
        Err(e) => warn!("Failed to list {}: {e}", dir.display()),
    }

    let resources_dir = dir.join(RESOURCES_DIR);
    if !resources_dir.is_dir() {
        return;
    }
    match yaml_entries(&resources_dir, Entries::All) {
        Ok(names) => {
            for name in names.iter().filter(|n| !declared(n.as_str())) {
                debug!("Undeclared resource manifest: {name}");
                reporter.warning("resource manifest not listed in kustomization");
            }
        }
        Err(e) => warn!("Failed to list {}: {e}", resources_dir.display()),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Entries {
    All,
    FilesOnly,
}

/// Sorted names of the `.yaml` entries directly inside `dir`.
///
/// Entries that cannot be read are logged and skipped.
fn yaml_entries(dir: &Path, which: Entries) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        if which == Entries::FilesOnly && entry.path().is_dir() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if name.ends_with(YAML_SUFFIX) => names.push(name.to_string()),
            Some(_) => {}
            None => debug!("Ignoring non UTF-8 file name in {}", dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

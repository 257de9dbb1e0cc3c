//! Per-manifest checks.
//!
//! Resource and patch manifests are expected to be named
//! `<name>.<kind>.yaml`, e.g. `frontend.deployment.yaml` for a `Deployment`
//! called `frontend`.

use crate::document::{render, Document};
use crate::report::Reporter;

/// A check run against every manifest of a manifest set.
pub trait ManifestCheck: Send + Sync {
    /// Returns the kebab-case name of this check.
    fn name(&self) -> &'static str;

    /// Checks one parsed manifest, reporting any problems.
    ///
    /// # Arguments
    ///
    /// * `doc` - The parsed manifest
    /// * `filename` - The manifest's file name, without directory
    /// * `reporter` - Sink for findings
    fn check(&self, doc: &Document, filename: &str, reporter: &mut Reporter<'_>);
}

/// Type alias for boxed check trait objects.
pub type CheckBox = Box<dyn ManifestCheck>;

/// The checks every manifest goes through, in order.
#[must_use]
pub fn default_checks() -> Vec<CheckBox> {
    vec![Box::new(KindMatchesFilename), Box::new(NameMatchesFilename)]
}

/// The dot-delimited segments of a manifest file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestName<'a> {
    /// First segment: the expected `metadata.name`.
    pub name: &'a str,
    /// Second segment: the expected lower-cased `kind`.
    pub kind: Option<&'a str>,
}

impl<'a> ManifestName<'a> {
    /// Splits a file name such as `frontend.deployment.yaml`.
    ///
    /// The `.yaml` extension is not a segment, so `foo.yaml` has no kind.
    #[must_use]
    pub fn parse(filename: &'a str) -> Self {
        let stem = filename.strip_suffix(".yaml").unwrap_or(filename);
        let mut segments = stem.split('.');
        Self {
            name: segments.next().unwrap_or_default(),
            kind: segments.next(),
        }
    }
}

/// Requires a `kind` whose lower-cased value equals the file name's second
/// segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct KindMatchesFilename;

impl ManifestCheck for KindMatchesFilename {
    fn name(&self) -> &'static str {
        "kind-matches-filename"
    }

    fn check(&self, doc: &Document, filename: &str, reporter: &mut Reporter<'_>) {
        let Some(kind) = doc.kind() else {
            reporter.problem("missing 'kind'");
            return;
        };

        let matches = match (ManifestName::parse(filename).kind, kind.as_str()) {
            (Some(expected), Some(actual)) => expected == actual.to_lowercase(),
            _ => false,
        };
        if !matches {
            reporter.problem(format!(
                "filename/manifest mismatch for 'kind': {}",
                render(kind)
            ));
        }
    }
}

/// Requires a `metadata.name` equal to the file name's first segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameMatchesFilename;

impl ManifestCheck for NameMatchesFilename {
    fn name(&self) -> &'static str {
        "name-matches-filename"
    }

    fn check(&self, doc: &Document, filename: &str, reporter: &mut Reporter<'_>) {
        let Some(name) = doc.metadata_name() else {
            reporter.problem("missing 'name'");
            return;
        };

        if name.as_str() != Some(ManifestName::parse(filename).name) {
            reporter.problem(format!(
                "filename/manifest mismatch for 'name': {}",
                render(name)
            ));
        }
    }
}

/// Checks the `secretGenerator` entries of a kustomization.
///
/// Entries without a `name` are reported and skipped. Named entries using
/// `literals` instead of `envs` are reported as problems.
pub fn check_secret_generators(doc: &Document, reporter: &mut Reporter<'_>) {
    let Some(generators) = doc.sequence("secretGenerator") else {
        return;
    };

    for generator in generators {
        let Some(name) = generator.get("name") else {
            reporter.problem("secretGenerator without name");
            continue;
        };
        if generator.get("literals").is_some() {
            reporter.problem(format!(
                "secretGenerator[name: {}]: 'envs' is preferred over 'literals'",
                render(name)
            ));
        }
    }
}

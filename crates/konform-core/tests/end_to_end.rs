//! Integration test: full runs via Linter.
//!
//! Uses fixture trees under `tests/fixtures/` for realistic layouts and
//! temporary directories for the small exit-code scenarios.

use konform_core::{Linter, Reporter, Severity, Summary};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn lint(root: &Path) -> (Summary, String) {
    let linter = Linter::builder().root(root).build().expect("linter should build");
    let mut buf = Vec::new();
    let summary = {
        let mut reporter = Reporter::new(&mut buf);
        linter.run(&mut reporter).expect("run should succeed")
    };
    (summary, String::from_utf8(buf).expect("report should be UTF-8"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `app/kustomization.yaml` declaring one resource that exists and matches.
fn clean_app() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "app/kustomization.yaml",
        "resources:\n  - frontend.deployment.yaml\n",
    );
    write(
        tmp.path(),
        "app/resources/frontend.deployment.yaml",
        "kind: Deployment\nmetadata:\n  name: frontend\n",
    );
    tmp
}

// ── Fixture trees ──

#[test]
fn clean_fixture_has_no_findings() {
    let (summary, out) = lint(&fixture_root("clean"));

    assert_eq!(summary.problems, 0, "unexpected problems:\n{out}");
    assert_eq!(summary.warnings, 0, "unexpected warnings:\n{out}");
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(out.matches("looks like a kustomize dir: ").count(), 2);
    assert!(out.ends_with("problems detected: 0\nwarnings detected: 0\n"));
}

#[test]
fn broken_fixture_reports_every_finding() {
    let (summary, out) = lint(&fixture_root("broken"));

    assert_eq!(summary.problems, 5, "report:\n{out}");
    assert_eq!(summary.warnings, 1, "report:\n{out}");
    assert_eq!(summary.exit_code(), 1);

    for expected in [
        "  \u{274C} filename/manifest mismatch for 'name': wrong",
        "  \u{274C} could not parse manifest",
        "unexpected kustomization.yaml",
        "  \u{274C} secretGenerator[name: db]: 'envs' is preferred over 'literals'",
        "  \u{274C} resource manifest not in resources/: backend.deployment.yaml",
        "  \u{26A0} resource manifest not listed in kustomization",
    ] {
        assert!(out.contains(expected), "missing {expected:?} in:\n{out}");
    }
}

#[test]
fn nested_kustomization_dir_is_visited_too() {
    let (_, out) = lint(&fixture_root("broken"));
    let root = fixture_root("broken");

    let app = format!("looks like a kustomize dir: {}", root.join("app").display());
    let patches = format!(
        "looks like a kustomize dir: {}",
        root.join("app/patches").display()
    );
    let app_at = out.find(&app).expect("app should be visited");
    let patches_at = out.find(&patches).expect("app/patches should be visited");
    assert!(app_at < patches_at);
}

#[test]
fn each_kustomize_dir_is_followed_by_a_blank_line() {
    let (_, out) = lint(&fixture_root("clean"));
    let lines: Vec<&str> = out.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("looks like a kustomize dir: ") {
            let next_marker = lines[i + 1..]
                .iter()
                .position(|l| l.starts_with("looks like") || l.starts_with("problems detected"))
                .map(|p| p + i + 1)
                .unwrap();
            assert_eq!(lines[next_marker - 1], "");
        }
    }
}

// ── Exit-code scenarios ──

#[test]
fn matching_resource_exits_zero() {
    let tmp = clean_app();
    let (summary, out) = lint(tmp.path());

    assert_eq!(summary.exit_code(), 0, "report:\n{out}");
    assert!(out.contains("problems detected: 0"));
    assert!(out.contains("warnings detected: 0"));
}

#[test]
fn wrong_name_exits_one() {
    let tmp = clean_app();
    write(
        tmp.path(),
        "app/resources/frontend.deployment.yaml",
        "kind: Deployment\nmetadata:\n  name: wrong\n",
    );
    let (summary, out) = lint(tmp.path());

    assert_eq!(summary.problems, 1, "report:\n{out}");
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn undeclared_resource_exits_two() {
    let tmp = clean_app();
    write(
        tmp.path(),
        "app/resources/extra.configmap.yaml",
        "kind: ConfigMap\nmetadata:\n  name: extra\n",
    );
    let (summary, out) = lint(tmp.path());

    assert_eq!(summary.problems, 0, "report:\n{out}");
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.exit_code(), 2);
}

#[test]
fn tree_without_kustomizations_prints_only_the_summary() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "docs/readme.yaml", "kind: nothing\n");

    let (summary, out) = lint(tmp.path());
    assert_eq!(summary, Summary::default());
    assert_eq!(out, "problems detected: 0\nwarnings detected: 0\n");
}

#[test]
fn findings_are_recorded_in_emission_order() {
    let tmp = clean_app();
    write(
        tmp.path(),
        "app/resources/frontend.deployment.yaml",
        "metadata: {}\n",
    );
    write(tmp.path(), "app/resources/zz.yaml", "kind: X\nmetadata:\n  name: zz\n");

    let linter = Linter::builder().root(tmp.path()).build().unwrap();
    let mut buf = Vec::new();
    let mut reporter = Reporter::new(&mut buf);
    linter.run(&mut reporter).unwrap();
    let (_, findings) = reporter.finish();

    let messages: Vec<(Severity, &str)> = findings
        .iter()
        .map(|f| (f.severity, f.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (Severity::Problem, "missing 'kind'"),
            (Severity::Problem, "missing 'name'"),
            (Severity::Problem, "filename/manifest mismatch for 'kind': X"),
            (
                Severity::Warning,
                "resource manifest not listed in kustomization"
            ),
        ]
    );
}

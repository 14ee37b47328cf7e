//! End-to-end tests for the `cascade` binary against a captured build.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/build.json")
}

/// A project root with no `cascade.toml`, so defaults apply.
fn cascade(root: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cascade"));
    cmd.current_dir(root.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn attribute_lists_pages_in_cascade_order() {
    let root = TempDir::new().unwrap();
    let expected = [
        "/ (src/pages/index.astro)",
        "  /assets/menu.3c4d.css  depth -1 order 0",
        "  /assets/global.4d5e.css  depth 1 order 0",
        "  /assets/index.2b3c.css  depth 0 order 0",
        "/about (src/pages/about.astro)",
        "  /assets/map.1f2e.css  depth -1 order -1",
        "  /assets/global.4d5e.css  depth 1 order 0",
        "removed from client bundle: assets/global.8a9b.css",
    ]
    .join("\n");

    cascade(&root)
        .arg("attribute")
        .arg(fixture())
        .arg("--root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn attribute_json_output() {
    let root = TempDir::new().unwrap();
    let output = cascade(&root)
        .args(["attribute", "--format", "json", "--root"])
        .arg(root.path())
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let pages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(pages[1]["route"], "/about");
    assert_eq!(pages[1]["css"][0]["href"], "/assets/map.1f2e.css");
    assert_eq!(pages[1]["css"][0]["depth"], -1);
}

#[test]
fn attribute_renders_head_with_configured_base() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("cascade.toml"), "[css]\nbase = \"/docs/\"\n").unwrap();

    cascade(&root)
        .args(["attribute", "--head", "--root"])
        .arg(root.path())
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"  | <link rel="stylesheet" href="/docs/assets/index.2b3c.css">"#,
        ))
        .stdout(predicate::str::contains(
            r#"  | <script type="module" data-hoist src="/docs/hoisted.7c1e.js"></script>"#,
        ));
}

#[test]
fn names_groups_css_by_pages() {
    let root = TempDir::new().unwrap();
    cascade(&root)
        .args(["names", "--root"])
        .arg(root.path())
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("/src/styles/global.css  about."))
        .stdout(predicate::str::contains("/src/styles/index.css  index."))
        // no page imports map.css statically
        .stdout(predicate::str::contains("/src/styles/map.css  index.e3b0c442"));
}

#[test]
fn check_rejects_relative_base() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("cascade.toml"), "[css]\nbase = \"docs/\"\n").unwrap();

    cascade(&root)
        .args(["check", "--root"])
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn check_accepts_defaults() {
    let root = TempDir::new().unwrap();
    cascade(&root)
        .args(["check", "--root"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration ok"));
}

#[test]
fn missing_build_file_fails() {
    let root = TempDir::new().unwrap();
    cascade(&root)
        .args(["attribute", "--root"])
        .arg(root.path())
        .arg(root.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn colored_logging_runs_without_no_color() {
    let root = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_cascade"))
        .current_dir(root.path())
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .args(["check", "--root"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration ok"));
}

#[test]
fn configured_log_level_applies_without_flags() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("cascade.toml"), "[settings]\nlog_level = \"debug\"\n").unwrap();

    cascade(&root)
        .args(["attribute", "--root"])
        .arg(root.path())
        .arg(fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("attributed CSS chunk"));
}

#[test]
fn silent_log_level_mutes_pass_summaries() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("cascade.toml"), "[settings]\nlog_level = \"silent\"\n").unwrap();

    cascade(&root)
        .args(["attribute", "--root"])
        .arg(root.path())
        .arg(fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("attribution complete").not());
}

#[test]
fn verbose_flag_overrides_configured_level() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("cascade.toml"), "[settings]\nlog_level = \"silent\"\n").unwrap();

    cascade(&root)
        .args(["-v", "attribute", "--root"])
        .arg(root.path())
        .arg(fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("attributed CSS chunk"));
}

//! End-to-end tests for the ndex-tasks binary.
//!
//! The bundler is stubbed with `true` / `false` from coreutils: the
//! orchestrator only observes exit status, so these exercise the full
//! clean / fan-out / aggregate path without a real bundler installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ndex_tasks() -> Command {
    Command::cargo_bin("ndex-tasks").unwrap()
}

fn write_config(root: &std::path::Path, json: &str) {
    fs::write(root.join("ndex.tasks.json"), json).unwrap();
}

#[test]
fn help_lists_subcommands() {
    ndex_tasks()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("dist"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn dist_succeeds_with_stub_bundler() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);

    ndex_tasks()
        .args(["dist", "--root"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("dist").is_dir());
}

#[test]
fn dist_fails_when_bundler_fails() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "false"}"#);

    ndex_tasks()
        .args(["dist", "--root"])
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn dist_cleans_stale_artifacts() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);

    let dist = temp.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("stale.js"), "stale").unwrap();

    ndex_tasks()
        .args(["dist", "--root"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(!dist.join("stale.js").exists());
}

#[test]
fn run_unknown_target_fails_with_configuration_error() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);

    ndex_tasks()
        .args(["run", "nope", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown target 'nope'"));

    assert!(!temp.path().join("nope").exists());
}

#[test]
fn run_builds_a_custom_target() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"{
            "bundler": "true",
            "targets": {
                "demos": [
                    {"entry": ["demos/a.js"], "output": "a.out.js"},
                    {"entry": ["demos/b.js"], "output": "b.out.js"}
                ]
            }
        }"#,
    );

    ndex_tasks()
        .args(["run", "demos", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("2 bundles"));

    assert!(temp.path().join("demos").is_dir());
}

#[test]
fn build_no_serve_regenerates_the_suite_entry() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);
    fs::create_dir_all(temp.path().join("spec")).unwrap();

    ndex_tasks()
        .args(["build", "--no-serve", "--root"])
        .arg(temp.path())
        .assert()
        .success();

    let entry = fs::read_to_string(temp.path().join("spec/index.js")).unwrap();
    assert!(entry.contains("require('./ndex_spec.coffee')"));
    assert!(entry.contains("describe('Adapters', function() {"));
}

#[test]
fn build_without_spec_dir_skips_suite_generation() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);

    ndex_tasks()
        .args(["build", "--no-serve", "--root"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(!temp.path().join("spec").exists());
}

#[test]
fn serve_fails_when_output_missing() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"bundler": "true"}"#);

    ndex_tasks()
        .args(["serve", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn invalid_root_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not-a-dir");
    fs::write(&file, "x").unwrap();

    ndex_tasks()
        .args(["dist", "--root"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#![cfg(feature = "cli")]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
#[allow(deprecated)]
fn test_slug() {
    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("slug").arg("Hello, World!");

    cmd.assert().success().stdout("hello-world\n");
}

#[test]
#[allow(deprecated)]
fn test_import_outline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "# Intro\n\nBody\n\n### Next Steps\n").unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("import").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("h1 #intro Intro"))
        .stdout(predicate::str::contains("p Body"))
        .stdout(predicate::str::contains("h3 #next-steps Next Steps"));
}

#[test]
#[allow(deprecated)]
fn test_import_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "## Title\n").unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("import").arg("--json").arg(&path);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let block = &json["blocks"][0];
    assert_eq!(block["kind"]["type"], "heading");
    assert_eq!(block["kind"]["level"], 2);
    assert_eq!(block["kind"]["id"], "");
}

#[test]
#[allow(deprecated)]
fn test_export_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "# Title\n\nText\n").unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("export").arg(&path);

    cmd.assert().success().stdout("# Title\n\nText\n");
}

#[test]
#[allow(deprecated)]
fn test_render_html() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "## Getting Started\n").unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("render").arg(&path);

    cmd.assert()
        .success()
        .stdout("<h2 id=\"getting-started\">Getting Started</h2>\n");
}

#[test]
#[allow(deprecated)]
fn test_missing_file_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("import").arg(dir.path().join("missing.md"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot read"));
}

#[test]
#[allow(deprecated)]
fn test_seven_hashes_is_a_paragraph() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "####### seven\n").unwrap();

    let mut cmd = Command::cargo_bin("md-heading").unwrap();
    cmd.arg("import").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("p ####### seven"));
}

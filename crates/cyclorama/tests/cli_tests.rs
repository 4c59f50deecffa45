//! Integration tests for CLI infrastructure

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use cyclorama_testkit::{temp_dir_in_workspace, write_config, write_pages};
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cyclorama"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_render_requires_arguments() {
    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("render").assert().failure();
}

#[test]
fn test_missing_start_page_is_fatal() {
    let temp = temp_dir_in_workspace();

    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("render")
        .arg(temp.path().join("ghost.md.j2"))
        .arg(temp.path().join("site"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Start page not found"));

    assert!(!temp.path().join("site").exists());
}

#[test]
fn test_start_page_without_template_extension() {
    let temp = temp_dir_in_workspace();
    let start = temp.path().join("index.md");
    std::fs::write(&start, "Hi").unwrap();

    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("analyze")
        .arg(&start)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a template ending in '.j2'"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = temp_dir_in_workspace();
    let start = write_pages(temp.path(), &[("index.md", "Hi")]);
    write_config(temp.path(), "[render]\ntemplate_extension = \"\"\n");

    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("render")
        .arg(&start)
        .arg(temp.path().join("site"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID_VALUE"));
}

#[test]
fn test_unparsable_config_is_fatal() {
    let temp = temp_dir_in_workspace();
    let start = write_pages(temp.path(), &[("index.md", "Hi")]);
    write_config(temp.path(), "[render\n");

    let mut cmd = Command::new(cargo_bin!("cyclorama"));
    cmd.arg("analyze")
        .arg(&start)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_PARSE_ERROR"));
}

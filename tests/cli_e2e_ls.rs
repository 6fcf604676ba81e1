//! End-to-end tests for the `ls` command

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_ls_help() {
    let mut cmd = cargo_bin_cmd!("gopin");

    cmd.arg("ls")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List the repositories"));
}

/// Test that a missing lock document produces an error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_ls_missing_lockfile() {
    let mut cmd = cargo_bin_cmd!("gopin");

    cmd.arg("ls")
        .arg("--lockfile")
        .arg("/nonexistent/dependencies.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

/// Test that the pinned repositories are listed in document order
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_ls_lists_pins_in_order() {
    let temp = assert_fs::TempDir::new().unwrap();
    let lockfile = temp.child("dependencies.json");
    lockfile
        .write_str(
            r#"{
  "Repositories": [
    { "ImportPath": "alpha", "Rev": "aaa111", "Lang": "golang" },
    { "ImportPath": "group/beta", "Rev": "bbb222", "Lang": "golang" }
  ]
}
"#,
        )
        .unwrap();

    let mut cmd = cargo_bin_cmd!("gopin");
    cmd.arg("ls")
        .arg("--lockfile")
        .arg(lockfile.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha aaa111"))
        .stdout(predicate::str::contains("group/beta bbb222"))
        .stdout(predicate::str::contains("2 repositories pinned"));
}

/// Test that a lock document violating the uniqueness invariant is rejected
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_ls_rejects_duplicate_import_paths() {
    let temp = assert_fs::TempDir::new().unwrap();
    let lockfile = temp.child("dependencies.json");
    lockfile
        .write_str(
            r#"{
  "Repositories": [
    { "ImportPath": "alpha", "Rev": "aaa111", "Lang": "golang" },
    { "ImportPath": "alpha", "Rev": "bbb222", "Lang": "golang" }
  ]
}
"#,
        )
        .unwrap();

    let mut cmd = cargo_bin_cmd!("gopin");
    cmd.arg("ls")
        .arg("--lockfile")
        .arg(lockfile.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate import path"));
}

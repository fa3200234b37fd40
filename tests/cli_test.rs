/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{PackageBuilder, page_xml, tag_xml};
use predicates::prelude::*;

#[test]
fn test_cli_stats_command_with_package() {
    let package = PackageBuilder::new()
        .with_record("content/site", &page_xml(r#"jcr:title="Site" cq:tags="[x]""#))
        .with_record("content/cq:tags/x", &tag_xml("X", ""))
        .build();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jcr-harvest"));
    cmd.arg("stats")
        .arg(package.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Package Harvest Statistics"))
        .stdout(predicate::str::contains("Nodes: 2"))
        .stdout(predicate::str::contains("Tags: 1"))
        .stdout(predicate::str::contains("Tag assignments: 1"));
}

#[test]
fn test_cli_dump_command_writes_json() {
    let package = PackageBuilder::new()
        .with_record("content/site", &page_xml(r#"jcr:title="Site""#))
        .build();
    let output = tempfile::NamedTempFile::new().unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jcr-harvest"));
    cmd.arg("dump")
        .arg(package.path())
        .arg("--output")
        .arg(output.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
    assert_eq!(json["nodes"][0]["path"], "/content/site");
    assert_eq!(json["properties"][0]["full_name"], "jcr:title");
    assert_eq!(json["namespaces"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_invalid_package_fails() {
    let package = PackageBuilder::new().with_raw_entry("README.txt", b"nope").build();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jcr-harvest"));
    cmd.arg("stats")
        .arg(package.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("jcr_root"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jcr-harvest"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jcr-harvest"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("dump"));
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Print the connector's connection specification",
        ))
        .stdout(predicate::str::contains(
            "Verify connectivity and permissions",
        ))
        .stdout(predicate::str::contains(
            "Discover the available streams and their schemas",
        ))
        .stdout(predicate::str::contains(
            "Read all records of the selected streams",
        ));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetstream"));
}

#[test]
fn test_spec_emits_connection_specification() {
    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    let output = cmd.arg("spec").assert().success().get_output().clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let message: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(message["type"], "SPEC");
    let props = &message["spec"]["connectionSpecification"]["properties"];
    assert!(props["spreadsheet_id"].is_object());
    assert!(props["access_token"].is_object());
    assert_eq!(props["names_conversion"]["default"], false);
}

#[test]
fn test_check_requires_config_flag() {
    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn test_check_with_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.args(["check", "--config", "/nonexistent/config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open config file"));
}

#[test]
fn test_discover_with_invalid_config_file_fails() {
    let mut config = NamedTempFile::new().unwrap();
    write!(config, "{{ not json").unwrap();

    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.args(["discover", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn test_read_requires_catalog_flag() {
    let mut config = NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{"spreadsheet_id": "abc", "access_token": "tok"}}"#
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("sheetstream").unwrap();
    cmd.args(["read", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--catalog"));
}

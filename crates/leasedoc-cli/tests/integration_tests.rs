//! Integration tests for leasedoc-cli.
//!
//! Each test runs the real binary against a throwaway JSON store (via the
//! global `--store` flag) and a config path that does not exist, so nothing
//! on the host machine leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary wired to an isolated store + config.
fn leasedoc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leasedoc").unwrap();
    cmd.arg("--store")
        .arg(dir.path().join("templates.json"))
        .arg("--config")
        .arg(dir.path().join("no-config.toml"))
        .arg("--no-color");
    cmd
}

/// Parse `list --format json` output and return the template ids.
fn list_json(dir: &TempDir, lease: Option<&str>) -> serde_json::Value {
    let mut cmd = leasedoc(dir);
    cmd.args(["list", "--format", "json"]);
    if let Some(lease) = lease {
        cmd.args(["--lease", lease]);
    }
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("list --format json must emit valid JSON")
}

#[test]
fn help_flag() {
    Command::cargo_bin("leasedoc")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("leasedoc"))
        .stdout(predicate::str::contains("add-text"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("leasedoc")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn add_text_then_list_shows_it() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args([
            "add-text",
            "Welcome letter",
            "--contents",
            "Dear {{tenant}},",
            "--field",
            "tenant=Ada",
            "--lease",
            "L1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome letter"))
        .stdout(predicate::str::contains("created"));

    let items = list_json(&dir, Some("L1"));
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "Welcome letter");
    assert_eq!(items[0]["type"], "text");
    assert_eq!(items[0]["html"], "<p>Dear Ada,</p>");
    assert_eq!(items[0]["linkedResourceIds"][0], "L1");
}

#[test]
fn add_file_descriptor_template() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args([
            "add-file",
            "Insurance",
            "--description",
            "Signed policy",
            "--expires",
            "--lease",
            "L1",
        ])
        .assert()
        .success();

    let items = list_json(&dir, None);
    assert_eq!(items[0]["type"], "fileDescriptor");
    assert_eq!(items[0]["hasExpiryDate"], true);
}

#[test]
fn shared_template_is_unlinked_then_deleted() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args([
            "add-text",
            "House rules",
            "--contents",
            "No smoking.",
            "--lease",
            "L1",
        ])
        .assert()
        .success();

    let id = list_json(&dir, Some("L1"))[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Saving from lease L2's context links the second lease.
    leasedoc(&dir)
        .args(["edit", &id, "--lease", "L2"])
        .assert()
        .success();
    assert_eq!(list_json(&dir, Some("L2")).as_array().unwrap().len(), 1);

    // First removal: still shared, so only unlinked.
    leasedoc(&dir)
        .args(["remove", &id, "--lease", "L1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unlinked"));

    assert!(list_json(&dir, Some("L1")).as_array().unwrap().is_empty());
    assert_eq!(list_json(&dir, Some("L2")).as_array().unwrap().len(), 1);

    // Second removal: last referrer, so deleted.
    leasedoc(&dir)
        .args(["remove", &id, "--lease", "L2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    assert!(list_json(&dir, None).as_array().unwrap().is_empty());
}

#[test]
fn edit_renames_and_rerenders() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args([
            "add-text",
            "Checklist",
            "--contents",
            "Keys: {{keys}}",
            "--lease",
            "L1",
        ])
        .assert()
        .success();

    let id = list_json(&dir, None)[0]["id"].as_str().unwrap().to_string();

    leasedoc(&dir)
        .args([
            "edit",
            &id,
            "--name",
            "Move-in checklist",
            "--contents",
            "Keys: {{keys}}",
            "--field",
            "keys=3",
        ])
        .assert()
        .success();

    let items = list_json(&dir, None);
    assert_eq!(items[0]["name"], "Move-in checklist");
    assert_eq!(items[0]["html"], "<p>Keys: 3</p>");
    // Identity survived the edit.
    assert_eq!(items[0]["id"], id.as_str());
}

#[test]
fn store_survives_between_invocations() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args(["add-text", "A", "--contents", "a", "--lease", "L1"])
        .assert()
        .success();
    leasedoc(&dir)
        .args(["add-file", "B", "--description", "b", "--lease", "L1"])
        .assert()
        .success();

    // A fresh process sees both.
    assert_eq!(list_json(&dir, Some("L1")).as_array().unwrap().len(), 2);
}

#[test]
fn orphan_template_without_lease_context() {
    let dir = TempDir::new().unwrap();

    leasedoc(&dir)
        .args(["add-text", "Orphan", "--contents", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not linked"));

    let items = list_json(&dir, None);
    assert!(items[0]["linkedResourceIds"].as_array().unwrap().is_empty());
}

//! End-to-end tests for the claimlint binary.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::str;

const LEVER_CLAIMS: &str = "\
1. A fastening system comprising: a frame; and a motor coupled to the frame.
2. The fastening system of claim 1, wherein the lever is attached to the motor.
";

fn write_claims(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("claims.txt");
    fs::write(&path, content).expect("write claims");
    path
}

fn claimlint() -> Command {
    Command::cargo_bin("claimlint").expect("binary exists")
}

#[test]
fn clean_claims_exit_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), "1. A widget comprising a frame.\n");

    let output = claimlint().arg(&claims).output().expect("runs");
    assert_eq!(output.status.code(), Some(0));
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.contains("Summary statistics:"));
    assert!(stdout.contains("Warnings: 0"));
}

#[test]
fn antecedent_basis_warning_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), LEVER_CLAIMS);

    let output = claimlint().arg("-a").arg(&claims).output().expect("runs");
    assert_eq!(output.status.code(), Some(2));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("Claim 2 recites \"lever\", which possibly lacks antecedent basis."));

    let marked = fs::read_to_string(dir.path().join("claims.txt.marked")).expect("marked file");
    assert!(marked.starts_with("1. A {fastening system} comprising:\n"));
    assert!(marked.contains("the [lever]"));
}

#[test]
fn filtered_warnings_do_not_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), LEVER_CLAIMS);

    let output = claimlint()
        .args(["-a", "-f", "ANTECEDENT BASIS"])
        .arg(&claims)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn malformed_markup_aborts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), "1. A {widget {frame}.\n");

    let output = claimlint().arg("-a").arg(&claims).output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("claimlint: claim 1:"));
}

#[test]
fn bad_claim_number_aborts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), "1a. A widget.\n");

    let output = claimlint().arg(&claims).output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn json_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), LEVER_CLAIMS);

    let output = claimlint()
        .args(["-a", "--json"])
        .arg(&claims)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["warnings"], 1);
    assert_eq!(value["search_string"], "lever");
    assert_eq!(value["diagnostics"][0]["claim"], 2);
}

#[test]
fn json_run_configuration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let claims = write_claims(dir.path(), LEVER_CLAIMS);
    let config = dir.path().join("run.json");
    let body = serde_json::json!({ "claims": claims, "ant_basis": true, "outfile": true });
    fs::write(&config, body.to_string()).expect("write config");

    let output = claimlint().arg(&config).output().expect("runs");
    assert_eq!(output.status.code(), Some(2));

    let out = fs::read_to_string(dir.path().join("claims.txt.out")).expect("out file");
    assert!(out.contains("\"lever\""));
}

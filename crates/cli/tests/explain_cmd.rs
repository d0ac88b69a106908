//! CLI tests for `mccmd explain`.

use std::process::Command;

use assert_cmd::cargo;

fn mccmd() -> Command {
    Command::new(cargo::cargo_bin!("mccmd"))
}

#[test]
fn explain_known_code_json() {
    let output = mccmd()
        .args(["explain", "MCC1101", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["id"], "MCC1101");
    assert!(
        json["explanation"].as_str().is_some_and(|s| !s.is_empty()),
        "missing explanation: {json}"
    );
}

#[test]
fn explain_warning_code_pretty() {
    let output = mccmd()
        .args(["explain", "MCC2003", "--output", "pretty"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MCC2003"));
    assert!(!stdout.contains("no explanation available"));
}

#[test]
fn explain_unknown_code_is_not_an_error() {
    let output = mccmd()
        .args(["explain", "MCC9999", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(json["explanation"].is_null());

    let output = mccmd()
        .args(["explain", "MCC9999", "--output", "pretty"])
        .output()
        .expect("run explain");
    assert!(String::from_utf8_lossy(&output.stdout).contains("no explanation available"));
}

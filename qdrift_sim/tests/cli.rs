//! Exit codes and error reporting of the `qdrift` binary.

use std::process::Command;

fn qdrift(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_qdrift"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn invalid_noise_is_reported_with_logging_off() {
    let output = qdrift(&["analyze", "--noise", "1.5", "--seed", "1", "--ci"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1.5"), "stderr: {stderr}");
}

#[test]
fn failed_export_is_reported_with_logging_off() {
    let dir = tempfile::tempdir().unwrap();
    let bad_path = dir.path().join("missing").join("report.json");
    let output = qdrift(&[
        "analyze",
        "--noise",
        "0.0",
        "--seed",
        "1",
        "--ci",
        "--output",
        bad_path.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error saving JSON"), "stderr: {stderr}");
}

#[test]
fn zero_noise_exits_cleanly() {
    let output = qdrift(&["analyze", "--noise", "0.0", "--seed", "1", "--ci"]);
    assert_eq!(output.status.code(), Some(0));
}

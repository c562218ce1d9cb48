use std::process::Command;

use tempfile::TempDir;

#[test]
fn test_invalid_format_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_energy-doctor"))
        .args(["--format", "jsn"])
        .output()
        .expect("binary should run");

    assert!(
        !output.status.success(),
        "Invalid --format values should cause a non-zero exit"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value"),
        "stderr should explain invalid format value. stderr: {stderr}"
    );
}

#[test]
fn test_score_flag_prints_bare_number() {
    let output = Command::new(env!("CARGO_BIN_EXE_energy-doctor"))
        .args(["tests/fixtures/sample_audit.json", "--score"])
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let score: u32 = stdout.trim().parse().expect("score output must be numeric");
    assert!(score <= 100);
}

#[test]
fn test_fail_below_gates_exit_code() {
    let output = Command::new(env!("CARGO_BIN_EXE_energy-doctor"))
        .args([
            "tests/fixtures/sample_audit.json",
            "--score",
            "--fail-below",
            "100",
        ])
        .output()
        .expect("binary should run");

    assert!(
        !output.status.success(),
        "a sub-100 score with --fail-below 100 must exit non-zero"
    );
}

#[test]
fn test_json_format_emits_parseable_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_energy-doctor"))
        .args(["tests/fixtures/sample_audit.json", "--format", "json"])
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["audit"].as_str().unwrap(), "sample_audit");
}

#[test]
fn test_missing_path_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_energy-doctor"))
        .arg(dir.path().join("nothing-here"))
        .output()
        .expect("binary should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

//! Integration test: command-line surface of the binary

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_pageflow"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(
        stdout.contains("pageflow 0.1.0"),
        "Expected version line, but got: {}",
        stdout
    );
}

#[test]
fn binary_requires_a_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_pageflow"))
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<FILE>"), "got: {}", stderr);
}

#[test]
fn binary_rejects_unknown_underline_mode() {
    let output = Command::new(env!("CARGO_BIN_EXE_pageflow"))
        .args(["--underline", "wavy", "book.txt"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown underline mode"), "got: {}", stderr);
}

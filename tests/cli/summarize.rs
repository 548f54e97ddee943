use crate::support::{chronicle, setup_test_dir, words};
use predicates::prelude::*;

// ============================================================================
// Summarize command tests
// ============================================================================

#[test]
fn test_summarize_short_text_is_rejected() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["summarize", "entry", "e1"])
        .write_stdin(words(180))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "rejected entry:e1: too short (180 words, minimum 200)",
        ));
}

#[test]
fn test_summarize_rejection_json() {
    let dir = setup_test_dir();

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "summarize", "character", "mara"])
        .write_stdin("A tall woman.")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "rejected");
    assert_eq!(json["key"], "character:mara");
    assert_eq!(json["reason"]["reason"], "too-short");
    assert_eq!(json["reason"]["words"], 3);
    assert_eq!(json["reason"]["minimum"], 200);
}

#[test]
fn test_summarize_without_summarizer_fails() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["summarize", "entry", "e1"])
        .write_stdin(words(250))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("summarizer unavailable"));

    // Nothing was cached
    chronicle()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No summaries"));
}

#[test]
fn test_summarize_reads_file() {
    let dir = setup_test_dir();
    let path = dir.path().join("bio.txt");
    std::fs::write(&path, words(20)).unwrap();

    chronicle()
        .current_dir(dir.path())
        .args(["summarize", "location", "harbour", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected location:harbour"));
}

#[test]
fn test_summarize_unknown_kind_is_usage_error() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["summarize", "journal", "x"])
        .write_stdin("text")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("content kind"));
}

#[test]
fn test_summarize_unreachable_endpoint_fails() {
    let dir = setup_test_dir();
    std::fs::write(
        dir.path().join(".chronicle/config.toml"),
        "[summarizer]\nendpoint = \"http://127.0.0.1:9/v1/chat/completions\"\ntimeout_seconds = 2\nmax_retries = 0\n",
    )
    .unwrap();

    chronicle()
        .current_dir(dir.path())
        .env("CHRONICLE_API_KEY", "test-key")
        .args(["summarize", "topic", "sailing"])
        .write_stdin(words(220))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("summarizer failed"));
}

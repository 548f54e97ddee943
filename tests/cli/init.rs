use crate::support::{chronicle, setup_test_dir};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Init command tests
// ============================================================================

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    chronicle()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized chronicle store"));

    assert!(dir.path().join(".chronicle/config.toml").exists());
    assert!(dir.path().join(".chronicle/chronicle.db").exists());
}

#[test]
fn test_init_idempotent() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"createdConfig\": false"));
}

#[test]
fn test_init_explicit_store_path() {
    let dir = tempdir().unwrap();

    chronicle()
        .current_dir(dir.path())
        .args(["--store", "journal-cache", "init"])
        .assert()
        .success();

    assert!(dir.path().join("journal-cache/config.toml").exists());
}

#[test]
fn test_init_writes_default_config() {
    let dir = setup_test_dir();
    let config = std::fs::read_to_string(dir.path().join(".chronicle/config.toml")).unwrap();

    assert!(config.contains("min_words_for_summary = 200"));
    assert!(config.contains("part_size = 20"));
    assert!(config.contains("api_key_env = \"CHRONICLE_API_KEY\""));
}

#[test]
fn test_init_rejects_invalid_config() {
    let dir = setup_test_dir();
    std::fs::write(
        dir.path().join(".chronicle/config.toml"),
        "[chronicle]\npart_size = 0\n",
    )
    .unwrap();

    chronicle()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("part_size"));
}

#[test]
fn test_missing_store_is_data_error() {
    let dir = tempdir().unwrap();

    chronicle()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_help_lists_commands() {
    chronicle()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: chronicle"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("rebalance"));
}

#[test]
fn test_json_usage_error_envelope() {
    chronicle()
        .args(["--format", "json", "summarize", "journal", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

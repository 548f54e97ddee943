use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for chronicle with no summarizer endpoint configured
pub fn chronicle() -> Command {
    let mut cmd = cargo_bin_cmd!("chronicle");
    cmd.env_remove("CHRONICLE_SUMMARIZER_ENDPOINT")
        .env_remove("CHRONICLE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Setup a test store in a fresh directory
pub fn setup_test_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    chronicle()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Text of exactly `n` words
#[allow(dead_code)]
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// Write `n` entries one hour apart to `entries.jsonl` and return its path
#[allow(dead_code)]
pub fn write_entries(dir: &Path, n: usize) -> PathBuf {
    let lines: Vec<String> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "id": format!("e{i}"),
                "content": format!("Entry number {i} about the day."),
                "createdAt": format!("2024-03-{:02}T{:02}:00:00Z", 1 + i / 24, i % 24),
            })
            .to_string()
        })
        .collect();
    let path = dir.join("entries.jsonl");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Insert a summary record straight into the store database
#[allow(dead_code)]
pub fn seed_summary(dir: &Path, key: &str, original: usize, summary_words: usize) {
    let record = serde_json::json!({
        "key": key,
        "content": words(summary_words),
        "originalWordCount": original,
        "summaryWordCount": summary_words,
        "compressionRatio": summary_words as f64 / original as f64,
        "contentFingerprint": "0011223344556677",
        "createdAt": "2024-03-01T08:00:00Z",
    });

    let conn = rusqlite::Connection::open(dir.join(".chronicle/chronicle.db")).unwrap();
    conn.execute(
        "INSERT OR REPLACE INTO kv (bucket, key, value, updated) VALUES ('summaries', ?1, ?2, ?3)",
        rusqlite::params![key, record.to_string(), "2024-03-01T08:00:00Z"],
    )
    .unwrap();
}

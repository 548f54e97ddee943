use crate::support::{chronicle, seed_summary, setup_test_dir};
use predicates::prelude::*;

// ============================================================================
// list / show / stats / rebalance over a seeded cache
// ============================================================================

#[test]
fn test_stats_empty_store() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summaries:          0"))
        .stdout(predicate::str::contains("Storage efficiency: 0.000"));
}

#[test]
fn test_stats_json() {
    let dir = setup_test_dir();
    seed_summary(dir.path(), "entry:e1", 300, 60);
    seed_summary(dir.path(), "character:mara", 100, 20);

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "stats"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalSummaries"], 2);
    assert_eq!(json["totalMetaSummaries"], 0);
    assert_eq!(json["totalSummaryWords"], 80);
    assert_eq!(json["totalOriginalWords"], 400);
    assert_eq!(json["storageEfficiency"], 0.2);
}

#[test]
fn test_list_with_prefix() {
    let dir = setup_test_dir();
    seed_summary(dir.path(), "entry:e1", 300, 60);
    seed_summary(dir.path(), "entry:e2", 300, 60);
    seed_summary(dir.path(), "character:mara", 100, 20);

    chronicle()
        .current_dir(dir.path())
        .args(["list", "--prefix", "entry:*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry:e1"))
        .stdout(predicate::str::contains("entry:e2"))
        .stdout(predicate::str::contains("character:mara").not());
}

#[test]
fn test_show_summary() {
    let dir = setup_test_dir();
    seed_summary(dir.path(), "entry:e1", 300, 5);

    chronicle()
        .current_dir(dir.path())
        .args(["show", "entry:e1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("300 -> 5 words"))
        .stdout(predicate::str::contains("w0 w1 w2 w3 w4"));
}

#[test]
fn test_show_missing_key() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "show", "entry:nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"not_found\""));
}

#[test]
fn test_rebalance_within_budget() {
    let dir = setup_test_dir();
    seed_summary(dir.path(), "entry:e1", 300, 60);

    chronicle()
        .current_dir(dir.path())
        .arg("rebalance")
        .assert()
        .success()
        .stdout(predicate::str::contains("within the word budget"));
}

#[test]
fn test_rebalance_without_summarizer_keeps_summaries() {
    let dir = setup_test_dir();
    for i in 0..15 {
        seed_summary(dir.path(), &format!("entry:e{:02}", i), 300, 50);
    }

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "rebalance"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["failedBatches"], 1);
    assert_eq!(json["metaKeys"].as_array().unwrap().len(), 0);

    let list = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "list"])
        .output()
        .unwrap();
    let items: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 15);
}

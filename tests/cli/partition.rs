use crate::support::{chronicle, write_entries};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Partition command tests (no store required)
// ============================================================================

#[test]
fn test_partition_forty_five_entries() {
    let dir = tempdir().unwrap();
    let entries = write_entries(dir.path(), 45);

    chronicle()
        .current_dir(dir.path())
        .arg("partition")
        .arg("--entries")
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "45 entries, part size 20: 2 closed parts, 5 open",
        ))
        .stdout(predicate::str::contains("part 2: e21 .. e40"));
}

#[test]
fn test_partition_json_with_part_size() {
    let dir = tempdir().unwrap();
    let entries = write_entries(dir.path(), 45);

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "partition", "--part-size", "10", "--entries"])
        .arg(&entries)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["closedParts"].as_array().unwrap().len(), 4);
    assert_eq!(json["openPart"]["size"], 5);
    assert_eq!(json["openPart"]["first"], "e41");
}

#[test]
fn test_partition_zero_size_is_usage_error() {
    let dir = tempdir().unwrap();
    let entries = write_entries(dir.path(), 5);

    chronicle()
        .current_dir(dir.path())
        .args(["partition", "--part-size", "0", "--entries"])
        .arg(&entries)
        .assert()
        .code(2);
}

#[test]
fn test_partition_missing_entry_log() {
    let dir = tempdir().unwrap();

    chronicle()
        .current_dir(dir.path())
        .args(["partition", "--entries", "missing.jsonl"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("entry log not found"));
}

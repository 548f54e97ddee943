use crate::support::{chronicle, setup_test_dir, write_entries};
use predicates::prelude::*;

// ============================================================================
// Chronicle subcommands without a summarizer
// ============================================================================

#[test]
fn test_status_on_fresh_store() {
    let dir = setup_test_dir();

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed parts: 0"));
}

#[test]
fn test_status_reports_pending_parts() {
    let dir = setup_test_dir();
    let entries = write_entries(dir.path(), 45);

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "status", "--entries"])
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending parts: 2"));
}

#[test]
fn test_close_advances_pointer_even_when_summaries_fail() {
    let dir = setup_test_dir();
    let entries = write_entries(dir.path(), 45);

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "close", "--entries"])
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed parts through 2"));

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "close", "--entries"])
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains("No new parts to close (latest: 2)"));

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "chronicle", "status"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["latestClosedPartIndex"], 2);
    let parts = json["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["memberEntryIds"].as_array().unwrap().len(), 20);
    assert_eq!(parts[1]["memberEntryIds"][0], "e21");
    assert!(parts[0]["summary"].is_null());
}

#[test]
fn test_backfill_without_summarizer_is_noop_after_close() {
    let dir = setup_test_dir();
    let entries = write_entries(dir.path(), 45);

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "close", "--entries"])
        .arg(&entries)
        .assert()
        .success();

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "backfill", "--entries"])
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to backfill"));
}

#[test]
fn test_backfill_json_report() {
    let dir = setup_test_dir();
    let entries = write_entries(dir.path(), 41);

    let output = chronicle()
        .current_dir(dir.path())
        .args(["--format", "json", "chronicle", "backfill", "--entries"])
        .arg(&entries)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["expectedParts"], 2);
    assert_eq!(json["closedParts"], serde_json::json!([1, 2]));
    assert_eq!(json["repairedSummaries"], serde_json::json!([]));
    assert_eq!(json["soFarUpdated"], false);
}

#[test]
fn test_recent_without_summarizer() {
    let dir = setup_test_dir();
    let entries = write_entries(dir.path(), 5);

    chronicle()
        .current_dir(dir.path())
        .args(["chronicle", "recent", "--entries"])
        .arg(&entries)
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent summary"));
}

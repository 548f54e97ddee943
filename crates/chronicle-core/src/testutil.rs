//! Test doubles shared by unit tests

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::chronicle::Entry;
use crate::error::{ChronicleError, Result};
use crate::store::{KeyValueStore, MemoryStore};
use crate::summarizer::{Summarizer, SummarizerError, SummaryRequest};

/// A request seen by [`FakeSummarizer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub text: String,
    pub target_words: usize,
    pub guidance: String,
}

/// Summarizer that answers with exactly `target_words` words and records calls
#[derive(Debug, Default)]
pub struct FakeSummarizer {
    calls: RefCell<Vec<RecordedRequest>>,
    unavailable: Cell<bool>,
    fail_marker: RefCell<Option<String>>,
}

impl FakeSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `Unavailable`
    pub fn unavailable() -> Self {
        let fake = Self::default();
        fake.unavailable.set(true);
        fake
    }

    /// Calls whose text contains `marker` fail with `Failure`
    pub fn failing_on(marker: &str) -> Self {
        let fake = Self::default();
        fake.fail_when_text_contains(Some(marker));
        fake
    }

    pub fn fail_when_text_contains(&self, marker: Option<&str>) {
        *self.fail_marker.borrow_mut() = marker.map(str::to_string);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.borrow().clone()
    }
}

impl Summarizer for FakeSummarizer {
    fn summarize(&self, request: &SummaryRequest<'_>) -> std::result::Result<String, SummarizerError> {
        self.calls.borrow_mut().push(RecordedRequest {
            text: request.text.to_string(),
            target_words: request.target_words,
            guidance: request.guidance.to_string(),
        });

        if self.unavailable.get() {
            return Err(SummarizerError::Unavailable("not enabled".to_string()));
        }
        if let Some(marker) = self.fail_marker.borrow().as_deref() {
            if request.text.contains(marker) {
                return Err(SummarizerError::Failure("quota exceeded".to_string()));
            }
        }

        let words = request.target_words.max(1);
        let mut out = vec!["condensed"; words];
        out[0] = "Summary";
        Ok(out.join(" "))
    }
}

/// Memory store whose writes fail for keys containing a marker
#[derive(Debug)]
pub struct FailingWriteStore {
    inner: MemoryStore,
    marker: String,
}

impl FailingWriteStore {
    pub fn new(marker: &str) -> Self {
        Self {
            inner: MemoryStore::new(),
            marker: marker.to_string(),
        }
    }
}

impl KeyValueStore for FailingWriteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.contains(&self.marker) {
            return Err(ChronicleError::storage(
                &format!("write {key}"),
                "disk I/O error",
            ));
        }
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.keys_with_prefix(prefix)
    }
}

/// Text of exactly `n` words
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// A fixed instant for deterministic timestamps
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

/// `n` entries one hour apart, oldest first
pub fn entries(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| Entry {
            id: format!("e{}", i + 1),
            content: format!("Entry number {} about the day.", i + 1),
            created_at: base_time() + Duration::hours(i as i64),
        })
        .collect()
}

//! Journal entries and the logs that supply them

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChronicleError, Result};

/// One immutable journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Source of journal entries, oldest first
///
/// Each call returns an independent snapshot.
pub trait EntryLog {
    fn list_entries(&self) -> Result<Vec<Entry>>;
}

impl EntryLog for [Entry] {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.to_vec())
    }
}

impl EntryLog for Vec<Entry> {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        self.as_slice().list_entries()
    }
}

/// Entry log stored as JSON lines, one entry per line
#[derive(Debug, Clone)]
pub struct JsonlEntryLog {
    path: PathBuf,
}

impl JsonlEntryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryLog for JsonlEntryLog {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            return Err(ChronicleError::not_found(
                "entry log",
                self.path.display(),
            ));
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for (line_no, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: Entry = serde_json::from_str(line).map_err(|e| {
                ChronicleError::invalid_value(
                    "entry log line",
                    format!("{}:{}: {}", self.path.display(), line_no + 1, e),
                )
            })?;
            entries.push(entry);
        }

        // Stable: entries sharing a timestamp keep file order
        entries.sort_by_key(|e| e.created_at);
        tracing::debug!(path = %self.path.display(), count = entries.len(), "loaded entries");
        Ok(entries)
    }
}

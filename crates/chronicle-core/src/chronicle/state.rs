//! Persisted rollup state of the chronicle

use serde::Serialize;

use super::keys;
use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore};
use crate::summary::Summary;

/// How much of the journal has been rolled up, and the rollups themselves
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronicleState {
    /// Highest closed part; never decreases
    pub latest_closed_part_index: usize,
    pub so_far_summary: Option<Summary>,
    pub recent_summary: Option<Summary>,
}

impl ChronicleState {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            latest_closed_part_index: stored_pointer(store)?,
            so_far_summary: get_json(store, keys::SO_FAR_SUMMARY)?,
            recent_summary: get_json(store, keys::RECENT_SUMMARY)?,
        })
    }

    /// Write the pointer and both rollups; absent rollups are removed
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        self.save_pointer(store)?;
        write_optional(store, keys::SO_FAR_SUMMARY, self.so_far_summary.as_ref())?;
        write_optional(store, keys::RECENT_SUMMARY, self.recent_summary.as_ref())
    }

    /// Persist the pointer unless the stored one is already as high
    pub fn save_pointer(&self, store: &dyn KeyValueStore) -> Result<()> {
        let stored = stored_pointer(store)?;
        if stored >= self.latest_closed_part_index {
            return Ok(());
        }
        set_json(store, keys::LATEST_PART, &self.latest_closed_part_index)
    }

    pub fn so_far_text(&self) -> Option<&str> {
        self.so_far_summary.as_ref().map(|s| s.content.as_str())
    }

    pub fn recent_text(&self) -> Option<&str> {
        self.recent_summary.as_ref().map(|s| s.content.as_str())
    }

    pub(crate) fn set_so_far(&mut self, store: &dyn KeyValueStore, summary: Summary) -> Result<()> {
        set_json(store, keys::SO_FAR_SUMMARY, &summary)?;
        self.so_far_summary = Some(summary);
        Ok(())
    }

    pub(crate) fn set_recent(&mut self, store: &dyn KeyValueStore, summary: Summary) -> Result<()> {
        set_json(store, keys::RECENT_SUMMARY, &summary)?;
        self.recent_summary = Some(summary);
        Ok(())
    }

    pub(crate) fn clear_recent(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        store.delete(keys::RECENT_SUMMARY)?;
        self.recent_summary = None;
        Ok(())
    }
}

fn stored_pointer(store: &dyn KeyValueStore) -> Result<usize> {
    Ok(get_json::<usize>(store, keys::LATEST_PART)?.unwrap_or(0))
}

fn write_optional(store: &dyn KeyValueStore, key: &str, summary: Option<&Summary>) -> Result<()> {
    match summary {
        Some(summary) => set_json(store, key, summary),
        None => store.delete(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Fingerprint;
    use crate::store::MemoryStore;
    use crate::testutil::base_time;

    fn rollup(key: &str, text: &str) -> Summary {
        Summary {
            key: key.to_string(),
            content: text.to_string(),
            original_word_count: 100,
            summary_word_count: 2,
            compression_ratio: 0.02,
            content_fingerprint: Fingerprint::of(text),
            created_at: base_time(),
            metadata: None,
        }
    }

    #[test]
    fn test_load_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(ChronicleState::load(&store).unwrap(), ChronicleState::default());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let state = ChronicleState {
            latest_closed_part_index: 2,
            so_far_summary: Some(rollup(keys::SO_FAR_SUMMARY, "So far.")),
            recent_summary: None,
        };
        state.save(&store).unwrap();

        let loaded = ChronicleState::load(&store).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.so_far_text(), Some("So far."));
        assert_eq!(store.get(keys::LATEST_PART).unwrap().unwrap(), "2");
    }

    #[test]
    fn test_pointer_never_decreases() {
        let store = MemoryStore::new();
        let high = ChronicleState {
            latest_closed_part_index: 3,
            ..Default::default()
        };
        high.save(&store).unwrap();

        let low = ChronicleState {
            latest_closed_part_index: 1,
            ..Default::default()
        };
        low.save(&store).unwrap();

        assert_eq!(ChronicleState::load(&store).unwrap().latest_closed_part_index, 3);
    }

    #[test]
    fn test_clear_recent() {
        let store = MemoryStore::new();
        let mut state = ChronicleState::default();
        state
            .set_recent(&store, rollup(keys::RECENT_SUMMARY, "Lately."))
            .unwrap();
        assert!(store.get(keys::RECENT_SUMMARY).unwrap().is_some());

        state.clear_recent(&store).unwrap();
        assert!(state.recent_text().is_none());
        assert!(store.get(keys::RECENT_SUMMARY).unwrap().is_none());
    }
}

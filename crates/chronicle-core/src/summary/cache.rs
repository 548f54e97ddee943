//! Summary records over a key-value store

use std::collections::BTreeMap;

use serde::Serialize;

use super::Summary;
use crate::error::Result;
use crate::kind::kind_of;
use crate::store::{get_json, set_json, KeyValueStore};

/// Aggregate figures over every cached record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// All records, meta-summaries included
    pub total_summaries: usize,
    pub total_meta_summaries: usize,
    pub total_summary_words: usize,
    pub total_original_words: usize,
    pub average_compression_ratio: f64,
    /// `total_summary_words / total_original_words`, 0 when nothing is cached
    pub storage_efficiency: f64,
}

/// Reads and writes [`Summary`] records; every call goes straight to the store
pub struct SummaryCache<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SummaryCache<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn get(&self, key: &str) -> Result<Option<Summary>> {
        get_json(self.store, key)
    }

    pub fn set(&self, key: &str, summary: &Summary) -> Result<()> {
        set_json(self.store, key, summary)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key)
    }

    /// Every record whose key starts with `pattern`; a trailing `*` is ignored
    pub fn get_by_prefix(&self, pattern: &str) -> Result<BTreeMap<String, Summary>> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        let mut found = BTreeMap::new();

        for key in self.store.keys_with_prefix(prefix)? {
            match self.get(&key) {
                Ok(Some(summary)) => {
                    found.insert(key, summary);
                }
                Ok(None) => {}
                // Corrupt records are skipped so one bad value cannot block listing
                Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable summary"),
            }
        }

        Ok(found)
    }

    /// Records grouped by the part of their key before the first `:`
    pub fn get_by_kind(&self) -> Result<BTreeMap<String, Vec<(String, Summary)>>> {
        let mut groups: BTreeMap<String, Vec<(String, Summary)>> = BTreeMap::new();
        for (key, summary) in self.get_by_prefix("")? {
            groups
                .entry(kind_of(&key).to_string())
                .or_default()
                .push((key, summary));
        }
        Ok(groups)
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let all = self.get_by_prefix("")?;
        let mut stats = CacheStats::default();
        let mut ratio_sum = 0.0;

        for summary in all.values() {
            stats.total_summaries += 1;
            if summary.is_meta() {
                stats.total_meta_summaries += 1;
            }
            stats.total_summary_words += summary.summary_word_count;
            stats.total_original_words += summary.original_word_count;
            ratio_sum += summary.compression_ratio;
        }

        if stats.total_summaries > 0 {
            stats.average_compression_ratio = ratio_sum / stats.total_summaries as f64;
        }
        if stats.total_original_words > 0 {
            stats.storage_efficiency =
                stats.total_summary_words as f64 / stats.total_original_words as f64;
        }

        Ok(stats)
    }
}

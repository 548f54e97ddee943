//! Cached summaries of individual content items
//!
//! A [`Summary`] is condensed text plus enough metadata to tell whether it
//! still matches its source: the fingerprint of the exact text it was
//! generated from. A summary carrying [`SummaryMetadata`] is a meta-summary
//! that replaced a batch of other summaries.

mod cache;
mod engine;
mod manager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

pub use cache::{CacheStats, SummaryCache};
pub use engine::{SummaryEngine, SummaryFailure};
pub use manager::{
    FailReason, ProcessOutcome, RebalanceReport, RebalanceSkip, RejectReason, SummaryContext,
    SummaryManager,
};

/// Extra metadata carried by meta-summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    /// Keys of the summaries this one replaced
    pub included_keys: Vec<String>,
    /// Number of summaries consolidated
    pub source_count: usize,
}

/// A condensed form of some content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub key: String,
    pub content: String,
    pub original_word_count: usize,
    pub summary_word_count: usize,
    pub compression_ratio: f64,
    pub content_fingerprint: Fingerprint,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SummaryMetadata>,
}

impl Summary {
    /// True for meta-summaries
    pub fn is_meta(&self) -> bool {
        self.metadata.is_some()
    }

    /// True when `content` is exactly the text this summary was made from
    pub fn matches(&self, content: &str) -> bool {
        self.content_fingerprint == Fingerprint::of(content)
    }
}

/// Summary length divided by original length, or 0 for empty originals
pub(crate) fn compression_ratio(original_words: usize, summary_words: usize) -> f64 {
    if original_words == 0 {
        0.0
    } else {
        summary_words as f64 / original_words as f64
    }
}

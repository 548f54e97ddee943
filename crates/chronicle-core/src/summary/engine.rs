//! Target lengths, metadata, and the calls into the summarizer
//!
//! Every summarizer error stops here: callers get a [`SummaryFailure`]
//! describing why no summary was produced, never a propagated error.

use chrono::Utc;

use super::{compression_ratio, Summary, SummaryMetadata};
use crate::config::SummaryConfig;
use crate::fingerprint::Fingerprint;
use crate::kind::SummaryKey;
use crate::summarizer::{Summarizer, SummarizerError, SummaryRequest};
use crate::text::{is_blank, join_sections, word_count};

/// Default compression ratio for [`target_words`]
pub const DEFAULT_RATIO: f64 = 0.2;
/// Default lower clamp for [`target_words`]
pub const MIN_TARGET_WORDS: usize = 10;
/// Default upper clamp for [`target_words`]
pub const DEFAULT_TARGET_WORDS: usize = 50;

const META_GUIDANCE: &str = "Combine these summaries into one. Keep the people, places, \
     events and recurring themes they share; drop repetition. Keep chronological order.";

/// Why no summary was produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryFailure {
    #[error("content is empty")]
    EmptyContent,

    #[error("no summaries to combine")]
    NoSources,

    #[error(transparent)]
    Summarizer(#[from] SummarizerError),
}

/// `clamp(floor(original * ratio), 10, 50)`
pub fn target_words(original_word_count: usize, ratio: f64) -> usize {
    clamp_target(
        original_word_count,
        ratio,
        MIN_TARGET_WORDS,
        DEFAULT_TARGET_WORDS,
    )
}

fn clamp_target(original_word_count: usize, ratio: f64, min: usize, max: usize) -> usize {
    let scaled = (original_word_count as f64 * ratio).floor() as usize;
    scaled.max(min).min(max)
}

/// Builds summaries through an injected summarizer
pub struct SummaryEngine<'a> {
    summarizer: &'a dyn Summarizer,
    config: SummaryConfig,
}

impl<'a> SummaryEngine<'a> {
    pub fn new(summarizer: &'a dyn Summarizer, config: SummaryConfig) -> Self {
        Self { summarizer, config }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Target length for a single summary using the configured clamps
    pub fn target_words(&self, original_word_count: usize, ratio: f64) -> usize {
        clamp_target(
            original_word_count,
            ratio,
            self.config.min_target_words,
            self.config.default_target_words,
        )
    }

    /// Summarize one content item using its kind's policy
    pub fn summarize_item(
        &self,
        key: &SummaryKey,
        content: &str,
    ) -> Result<Summary, SummaryFailure> {
        let policy = key.kind.policy(self.config.compression_ratio);
        let target = self.target_words(word_count(content), policy.ratio);
        self.summarize(&key.to_string(), content, Some(target), policy.guidance)
    }

    /// Summarize `content` into a record stored under `key`
    ///
    /// Blank content is rejected before the summarizer is called. Without an
    /// explicit target the configured ratio and clamps apply.
    pub fn summarize(
        &self,
        key: &str,
        content: &str,
        target: Option<usize>,
        guidance: &str,
    ) -> Result<Summary, SummaryFailure> {
        if is_blank(content) {
            return Err(SummaryFailure::EmptyContent);
        }

        let original_words = word_count(content);
        let target = target.unwrap_or_else(|| {
            self.target_words(original_words, self.config.compression_ratio)
        });

        let request = SummaryRequest {
            text: content,
            target_words: target,
            guidance,
        };

        let text = match self.summarizer.summarize(&request) {
            Ok(text) if !is_blank(&text) => text.trim().to_string(),
            Ok(_) => {
                let failure = SummarizerError::Failure("summarizer returned no text".to_string());
                tracing::warn!(key, error = %failure, "summarization failed");
                return Err(failure.into());
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "summarization failed");
                return Err(e.into());
            }
        };

        let summary_words = word_count(&text);
        tracing::debug!(key, original_words, summary_words, target, "summarized");

        Ok(Summary {
            key: key.to_string(),
            content: text,
            original_word_count: original_words,
            summary_word_count: summary_words,
            compression_ratio: compression_ratio(original_words, summary_words),
            content_fingerprint: Fingerprint::of(content),
            created_at: Utc::now(),
            metadata: None,
        })
    }

    /// Combine several summaries into one meta-summary stored under `meta_key`
    ///
    /// Texts are joined in the given order, separated by a blank line.
    pub fn summarize_many(
        &self,
        summaries: &[Summary],
        meta_key: &str,
    ) -> Result<Summary, SummaryFailure> {
        if summaries.is_empty() {
            return Err(SummaryFailure::NoSources);
        }

        let combined = join_sections(summaries.iter().map(|s| s.content.as_str()));
        let mut meta = self.summarize(
            meta_key,
            &combined,
            Some(self.config.meta_target_words),
            META_GUIDANCE,
        )?;

        meta.metadata = Some(SummaryMetadata {
            included_keys: summaries.iter().map(|s| s.key.clone()).collect(),
            source_count: summaries.len(),
        });
        Ok(meta)
    }
}

//! End-to-end processing of single content items
//!
//! For one `(kind, id)` pair the manager decides whether the cached summary
//! is still good, needs to be created, or must be regenerated, and keeps the
//! cache bounded by folding old summaries into meta-summaries.

use std::time::Instant;

use serde::Serialize;

use super::{Summary, SummaryCache, SummaryEngine, SummaryFailure};
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::kind::{meta_key, ContentKind, SummaryKey};
use crate::text::word_count;

/// Everything a manager call needs; passed explicitly on every call
pub struct SummaryContext<'a> {
    pub engine: &'a SummaryEngine<'a>,
    pub cache: &'a SummaryCache<'a>,
}

/// Why content was not summarized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum RejectReason {
    TooShort { words: usize, minimum: usize },
}

/// Why summarization was attempted but produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    Summarizer(SummaryFailure),
    Storage(String),
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailReason::Summarizer(e) => write!(f, "{}", e),
            FailReason::Storage(e) => write!(f, "{}", e),
        }
    }
}

/// Result of [`SummaryManager::process`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Cached summary still matches the content
    Unchanged(Summary),
    /// No summary existed; one was written
    Created(Summary),
    /// A stale summary was replaced
    Updated(Summary),
    Rejected(RejectReason),
    Failed(FailReason),
}

impl ProcessOutcome {
    /// `unchanged`, `created`, `updated`, `rejected` or `failed`
    pub fn status(&self) -> &'static str {
        match self {
            ProcessOutcome::Unchanged(_) => "unchanged",
            ProcessOutcome::Created(_) => "created",
            ProcessOutcome::Updated(_) => "updated",
            ProcessOutcome::Rejected(_) => "rejected",
            ProcessOutcome::Failed(_) => "failed",
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            ProcessOutcome::Unchanged(s)
            | ProcessOutcome::Created(s)
            | ProcessOutcome::Updated(s) => Some(s),
            ProcessOutcome::Rejected(_) | ProcessOutcome::Failed(_) => None,
        }
    }
}

/// Why a rebalance did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebalanceSkip {
    /// Total summary words within budget
    WithinWordBudget,
    /// Too few summaries to consolidate
    BelowSummaryCount,
}

/// What a rebalance pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<RebalanceSkip>,
    /// Keys of meta-summaries written
    pub meta_keys: Vec<String>,
    /// Keys of summaries folded into a meta-summary and deleted
    pub removed_keys: Vec<String>,
    /// Batches left in place because a step failed
    pub failed_batches: usize,
}

/// Orchestrates per-item summaries and consolidation
#[derive(Debug, Clone)]
pub struct SummaryManager {
    config: SummaryConfig,
}

impl SummaryManager {
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// Bring the cached summary of `(kind, id)` up to date with `content`
    ///
    /// The summarizer is not called when the cached summary was made from the
    /// exact same text, unless `force` is set.
    #[tracing::instrument(skip(self, ctx, kind, content), fields(kind = %kind))]
    pub fn process(
        &self,
        ctx: &SummaryContext<'_>,
        kind: ContentKind,
        id: &str,
        content: &str,
        force: bool,
    ) -> Result<ProcessOutcome> {
        let key = SummaryKey::new(kind, id)?;
        let key_str = key.to_string();

        let existing = match ctx.cache.get(&key_str) {
            Ok(existing) => existing,
            Err(e) => return Ok(ProcessOutcome::Failed(FailReason::Storage(e.to_string()))),
        };

        if let Some(existing) = &existing {
            if !force && existing.matches(content) {
                tracing::debug!(key = %key_str, "summary unchanged");
                return Ok(ProcessOutcome::Unchanged(existing.clone()));
            }
        }

        let words = word_count(content);
        if words < self.config.min_words_for_summary {
            tracing::debug!(key = %key_str, words, "content too short to summarize");
            return Ok(ProcessOutcome::Rejected(RejectReason::TooShort {
                words,
                minimum: self.config.min_words_for_summary,
            }));
        }

        let summary = match ctx.engine.summarize_item(&key, content) {
            Ok(summary) => summary,
            Err(e) => return Ok(ProcessOutcome::Failed(FailReason::Summarizer(e))),
        };

        if let Err(e) = ctx.cache.set(&key_str, &summary) {
            return Ok(ProcessOutcome::Failed(FailReason::Storage(e.to_string())));
        }

        let outcome = if existing.is_some() {
            tracing::info!(key = %key_str, "summary updated");
            ProcessOutcome::Updated(summary)
        } else {
            tracing::info!(key = %key_str, "summary created");
            ProcessOutcome::Created(summary)
        };

        if let Err(e) = self.rebalance(ctx) {
            tracing::warn!(error = %e, "rebalance after write failed");
        }

        Ok(outcome)
    }

    /// Fold old summaries into meta-summaries once the cache outgrows its budget
    ///
    /// Only kind groups with at least `meta_trigger_count` members are
    /// consolidated, oldest first, in full batches of that size. Every batch
    /// of a kind is written to the same `<kind>-meta` key, so a later batch
    /// replaces the meta-summary of an earlier one. A failed batch is left in
    /// place and the remaining batches still run.
    pub fn rebalance(&self, ctx: &SummaryContext<'_>) -> Result<RebalanceReport> {
        let start = Instant::now();
        let stats = ctx.cache.stats()?;
        let mut report = RebalanceReport::default();

        if stats.total_summary_words <= self.config.target_total_words {
            report.skipped = Some(RebalanceSkip::WithinWordBudget);
            return Ok(report);
        }
        if stats.total_summaries < self.config.max_summaries_before_meta {
            report.skipped = Some(RebalanceSkip::BelowSummaryCount);
            return Ok(report);
        }

        let batch_size = self.config.meta_trigger_count;
        for (kind, mut group) in ctx.cache.get_by_kind()? {
            if group.len() < batch_size {
                continue;
            }

            group.sort_by(|(ka, a), (kb, b)| a.created_at.cmp(&b.created_at).then(ka.cmp(kb)));
            let summaries: Vec<Summary> = group.into_iter().map(|(_, s)| s).collect();

            for batch in summaries.chunks_exact(batch_size) {
                self.consolidate_batch(ctx, &kind, batch, &mut report);
            }
        }

        crate::trace_time!(start, "rebalance", batches = report.meta_keys.len());
        Ok(report)
    }

    fn consolidate_batch(
        &self,
        ctx: &SummaryContext<'_>,
        kind: &str,
        batch: &[Summary],
        report: &mut RebalanceReport,
    ) {
        let target_key = meta_key(kind);

        let meta = match ctx.engine.summarize_many(batch, &target_key) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(kind, error = %e, "meta-summary generation failed");
                report.failed_batches += 1;
                return;
            }
        };

        // Constituents are only removed once the meta-summary is stored
        if let Err(e) = ctx.cache.set(&target_key, &meta) {
            tracing::warn!(key = %target_key, error = %e, "failed to store meta-summary");
            report.failed_batches += 1;
            return;
        }

        for summary in batch {
            match ctx.cache.delete(&summary.key) {
                Ok(()) => report.removed_keys.push(summary.key.clone()),
                Err(e) => tracing::warn!(key = %summary.key, error = %e, "failed to delete"),
            }
        }

        tracing::info!(
            key = %target_key,
            sources = batch.len(),
            "consolidated summaries into meta-summary"
        );
        report.meta_keys.push(target_key);
    }
}

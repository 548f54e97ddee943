//! Hierarchical rollup of the journal
//!
//! Closed parts get a summary and a title once. The so-far summary condenses
//! every closed part summary; the recent summary condenses the open part.
//! A failed summarizer call leaves that piece missing and never stops the
//! pointer from advancing; [`ChronicleAggregator::backfill`] fills the gaps
//! later.

use std::time::Instant;

use serde::Serialize;

use super::part::{sanitize_title, PartStore};
use super::{keys, ChronicleContext, ChronicleState, Entry};
use crate::config::PartConfig;
use crate::error::Result;
use crate::partition::{closed_part_count, part_window, partition};
use crate::text::join_sections;

const PART_GUIDANCE: &str = "Summarize this stretch of journal entries. Keep the events, \
     people and places in the order they happened, and how the writer felt about them.";

const TITLE_GUIDANCE: &str = "Write a short title for this stretch of journal entries. \
     Reply with the title only, no quotes.";

const ROLLUP_GUIDANCE: &str = "Combine these summaries of consecutive journal periods into \
     one account of the journal so far, in chronological order.";

const RECENT_GUIDANCE: &str = "Summarize these most recent journal entries. Keep what is \
     happening now and what the writer is looking ahead to.";

/// Which pieces of a part to (re)generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    Everything,
    MissingOnly,
}

/// What was written for one part
#[derive(Debug, Clone, Copy, Default)]
struct PartWrites {
    members: bool,
    summary: bool,
    title: bool,
}

/// What a [`ChronicleAggregator::backfill`] pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    /// Closed parts implied by the entry count
    pub expected_parts: usize,
    /// Parts the pointer advanced over
    pub closed_parts: Vec<usize>,
    pub repaired_members: Vec<usize>,
    pub repaired_summaries: Vec<usize>,
    pub repaired_titles: Vec<usize>,
    pub so_far_updated: bool,
    pub recent_updated: bool,
}

impl BackfillReport {
    /// True when nothing needed doing
    pub fn is_noop(&self) -> bool {
        self.closed_parts.is_empty()
            && self.repaired_members.is_empty()
            && self.repaired_summaries.is_empty()
            && self.repaired_titles.is_empty()
            && !self.so_far_updated
            && !self.recent_updated
    }
}

/// Maintains part summaries, titles and rollups for one journal
#[derive(Debug, Clone)]
pub struct ChronicleAggregator {
    config: PartConfig,
}

impl ChronicleAggregator {
    pub fn new(config: PartConfig) -> Self {
        Self { config }
    }

    pub fn part_size(&self) -> usize {
        self.config.part_size
    }

    /// Close every part the entry count now fills
    ///
    /// Returns false without touching the summarizer when no new part is due,
    /// so repeated calls with the same entries are free.
    pub fn maybe_close_parts(
        &self,
        ctx: &ChronicleContext<'_>,
        state: &mut ChronicleState,
        entries: &[Entry],
    ) -> Result<bool> {
        let expected = closed_part_count(entries.len(), self.part_size());
        if expected <= state.latest_closed_part_index {
            tracing::debug!(
                expected,
                latest = state.latest_closed_part_index,
                "no new parts to close"
            );
            return Ok(false);
        }

        let parts = PartStore::new(ctx.store);
        for index in state.latest_closed_part_index + 1..=expected {
            if let Some(window) = part_window(entries, self.part_size(), index) {
                self.fill_part(ctx, &parts, index, window, Fill::Everything)?;
            }
            state.latest_closed_part_index = index;
            state.save_pointer(ctx.store)?;
            tracing::info!(part = index, "closed part");
        }

        self.recompute_so_far(ctx, state, expected)?;
        Ok(true)
    }

    /// Bring the recent summary in line with the open part
    ///
    /// Returns whether the stored recent summary changed.
    pub fn recompute_recent_summary(
        &self,
        ctx: &ChronicleContext<'_>,
        state: &mut ChronicleState,
        entries: &[Entry],
    ) -> Result<bool> {
        let open = partition(entries, self.part_size()).open_part;
        if open.is_empty() {
            if state.recent_summary.is_none() {
                return Ok(false);
            }
            state.clear_recent(ctx.store)?;
            tracing::info!("open part empty, cleared recent summary");
            return Ok(true);
        }

        let text = join_sections(open.iter().map(|e| e.content.as_str()));
        if let Some(existing) = &state.recent_summary {
            if existing.matches(&text) {
                tracing::debug!(entries = open.len(), "recent summary unchanged");
                return Ok(false);
            }
        }

        match ctx.engine.summarize(
            keys::RECENT_SUMMARY,
            &text,
            Some(self.config.recent_target_words),
            RECENT_GUIDANCE,
        ) {
            Ok(summary) => {
                state.set_recent(ctx.store, summary)?;
                tracing::info!(entries = open.len(), "updated recent summary");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "recent summary skipped");
                Ok(false)
            }
        }
    }

    /// Idempotent catch-up: close due parts and repair anything missing
    ///
    /// Walks every closed part, not just new ones, so summaries or titles lost
    /// to earlier summarizer failures are regenerated. Existing pieces are
    /// left alone.
    pub fn backfill(
        &self,
        ctx: &ChronicleContext<'_>,
        state: &mut ChronicleState,
        entries: &[Entry],
    ) -> Result<BackfillReport> {
        let start = Instant::now();
        let expected = closed_part_count(entries.len(), self.part_size());
        let mut report = BackfillReport {
            expected_parts: expected,
            ..Default::default()
        };

        let parts = PartStore::new(ctx.store);
        for index in 1..=expected {
            let window = match part_window(entries, self.part_size(), index) {
                Some(window) => window,
                None => continue,
            };

            let writes = self.fill_part(ctx, &parts, index, window, Fill::MissingOnly)?;
            if writes.members {
                report.repaired_members.push(index);
            }
            if writes.summary {
                report.repaired_summaries.push(index);
            }
            if writes.title {
                report.repaired_titles.push(index);
            }

            if index > state.latest_closed_part_index {
                state.latest_closed_part_index = index;
                state.save_pointer(ctx.store)?;
                report.closed_parts.push(index);
            }
        }

        let rollup_stale =
            !report.closed_parts.is_empty() || !report.repaired_summaries.is_empty();
        if expected > 0 && (rollup_stale || state.so_far_summary.is_none()) {
            report.so_far_updated = self.recompute_so_far(ctx, state, expected)?;
        }
        if state.recent_summary.is_none() {
            report.recent_updated = self.recompute_recent_summary(ctx, state, entries)?;
        }

        if report.is_noop() {
            tracing::debug!(expected, "backfill found nothing to repair");
        } else {
            tracing::info!(
                expected,
                closed = report.closed_parts.len(),
                summaries = report.repaired_summaries.len(),
                titles = report.repaired_titles.len(),
                "backfill complete"
            );
        }
        crate::trace_time!(start, "backfill", expected = expected);
        Ok(report)
    }

    fn fill_part(
        &self,
        ctx: &ChronicleContext<'_>,
        parts: &PartStore<'_>,
        index: usize,
        window: &[Entry],
        fill: Fill,
    ) -> Result<PartWrites> {
        let ids: Vec<String> = window.iter().map(|e| e.id.clone()).collect();
        let mut writes = PartWrites {
            members: parts.set_members_once(index, &ids)?,
            ..Default::default()
        };

        let text = join_sections(window.iter().map(|e| e.content.as_str()));

        if fill == Fill::Everything || parts.summary(index)?.is_none() {
            match ctx.engine.summarize(
                &keys::part_summary(index),
                &text,
                Some(self.config.part_target_words),
                PART_GUIDANCE,
            ) {
                Ok(summary) => {
                    parts.set_summary(index, &summary)?;
                    writes.summary = true;
                }
                Err(e) => tracing::warn!(part = index, error = %e, "part summary skipped"),
            }
        }

        if fill == Fill::Everything || parts.title(index)?.is_none() {
            if let Some(title) = self.generate_title(ctx, index, &text) {
                parts.set_title(index, &title)?;
                writes.title = true;
            }
        }

        Ok(writes)
    }

    fn generate_title(&self, ctx: &ChronicleContext<'_>, index: usize, text: &str) -> Option<String> {
        let max_words = self.config.title_max_words;
        match ctx
            .engine
            .summarize(&keys::part_title(index), text, Some(max_words), TITLE_GUIDANCE)
        {
            Ok(raw) => {
                let title = sanitize_title(&raw.content, max_words);
                if title.is_empty() {
                    tracing::warn!(part = index, "summarizer returned an empty title");
                    None
                } else {
                    Some(title)
                }
            }
            Err(e) => {
                tracing::warn!(part = index, error = %e, "part title skipped");
                None
            }
        }
    }

    /// Rebuild the so-far summary from part summaries 1..=through
    fn recompute_so_far(
        &self,
        ctx: &ChronicleContext<'_>,
        state: &mut ChronicleState,
        through: usize,
    ) -> Result<bool> {
        let parts = PartStore::new(ctx.store);
        let mut sections = Vec::with_capacity(through);
        for index in 1..=through {
            if let Some(summary) = parts.summary(index)? {
                sections.push(summary.content);
            }
        }

        let combined = join_sections(sections.iter().map(String::as_str));
        if combined.is_empty() {
            tracing::debug!(through, "no part summaries to roll up");
            return Ok(false);
        }

        match ctx.engine.summarize(
            keys::SO_FAR_SUMMARY,
            &combined,
            Some(self.config.rollup_target_words),
            ROLLUP_GUIDANCE,
        ) {
            Ok(summary) => {
                state.set_so_far(ctx.store, summary)?;
                tracing::info!(parts = sections.len(), "updated so-far summary");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "so-far summary skipped");
                Ok(false)
            }
        }
    }
}

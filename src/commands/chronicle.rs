//! `chronicle chronicle` commands - maintain the journal rollup

use std::path::Path;

use crate::cli::Cli;
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::chronicle::{
    ChronicleAggregator, ChronicleContext, ChronicleState, Entry, EntryLog, JsonlEntryLog,
    PartStore,
};
use chronicle_core::error::Result;
use chronicle_core::partition::closed_part_count;
use chronicle_core::summary::SummaryEngine;

/// Load entries and state, then run `op` with a ready context
fn with_aggregator<T>(
    store: &StoreHandle,
    entries_path: &Path,
    op: impl FnOnce(&ChronicleAggregator, &ChronicleContext<'_>, &mut ChronicleState, &[Entry]) -> Result<T>,
) -> Result<(T, ChronicleState)> {
    let entries = JsonlEntryLog::new(entries_path).list_entries()?;
    let summarizer = store.summarizer();
    let engine = SummaryEngine::new(summarizer.as_ref(), store.config.summary.clone());
    let bucket = store.chronicle();
    let ctx = ChronicleContext {
        engine: &engine,
        store: &bucket,
    };

    let mut state = ChronicleState::load(&bucket)?;
    let aggregator = ChronicleAggregator::new(store.config.chronicle.clone());
    let value = op(&aggregator, &ctx, &mut state, &entries)?;
    Ok((value, state))
}

/// Close every part the entry log now fills
pub fn close(cli: &Cli, store: &StoreHandle, entries_path: &Path) -> Result<()> {
    let (closed, state) = with_aggregator(store, entries_path, |agg, ctx, state, entries| {
        agg.maybe_close_parts(ctx, state, entries)
    })?;

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "closed": closed,
            "latestClosedPartIndex": state.latest_closed_part_index,
        })),
        human => {
            if closed {
                println!("Closed parts through {}", state.latest_closed_part_index);
            } else if !cli.quiet {
                println!(
                    "No new parts to close (latest: {})",
                    state.latest_closed_part_index
                );
            }
        }
    )
}

/// Refresh the recent summary
pub fn recent(cli: &Cli, store: &StoreHandle, entries_path: &Path) -> Result<()> {
    let (changed, state) = with_aggregator(store, entries_path, |agg, ctx, state, entries| {
        agg.recompute_recent_summary(ctx, state, entries)
    })?;

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "changed": changed,
            "recentSummary": state.recent_text(),
        })),
        human => {
            match state.recent_text() {
                Some(text) => println!("{}", text),
                None => {
                    if !cli.quiet {
                        println!("No recent summary");
                    }
                }
            }
        }
    )
}

/// Close due parts and repair missing pieces
pub fn backfill(cli: &Cli, store: &StoreHandle, entries_path: &Path) -> Result<()> {
    let (report, state) = with_aggregator(store, entries_path, |agg, ctx, state, entries| {
        agg.backfill(ctx, state, entries)
    })?;

    output_by_format_result!(cli.format,
        json => print_json(&report),
        human => {
            if report.is_noop() {
                if !cli.quiet {
                    println!("Nothing to backfill");
                }
            } else {
                println!(
                    "Backfilled through part {}: {} closed, {} summaries, {} titles repaired",
                    state.latest_closed_part_index,
                    report.closed_parts.len(),
                    report.repaired_summaries.len(),
                    report.repaired_titles.len()
                );
            }
        }
    )
}

/// Show the pointer, parts and rollups
pub fn status(cli: &Cli, store: &StoreHandle, entries_path: Option<&Path>) -> Result<()> {
    let bucket = store.chronicle();
    let state = ChronicleState::load(&bucket)?;
    let parts = PartStore::new(&bucket);
    let loaded = (1..=state.latest_closed_part_index)
        .map(|i| parts.load_part(i))
        .collect::<Result<Vec<_>>>()?;

    let expected = match entries_path {
        Some(path) => {
            let entries = JsonlEntryLog::new(path).list_entries()?;
            Some(closed_part_count(entries.len(), store.config.chronicle.part_size))
        }
        None => None,
    };

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "latestClosedPartIndex": state.latest_closed_part_index,
            "expectedParts": expected,
            "parts": loaded,
            "soFarSummary": state.so_far_text(),
            "recentSummary": state.recent_text(),
        })),
        human => {
            println!("Closed parts: {}", state.latest_closed_part_index);
            if let Some(expected) = expected {
                let pending = expected.saturating_sub(state.latest_closed_part_index);
                println!("Pending parts: {}", pending);
            }
            for part in &loaded {
                let title = part.title.as_deref().unwrap_or("(untitled)");
                let marker = if part.is_complete() { "" } else { " [incomplete]" };
                println!("  {:>3}. {}{}", part.index, title, marker);
            }
            if let Some(text) = state.so_far_text() {
                println!();
                println!("So far:");
                println!("{}", text);
            }
            if let Some(text) = state.recent_text() {
                println!();
                println!("Recently:");
                println!("{}", text);
            }
        }
    )
}

//! `chronicle partition` command - dry-run part layout of an entry log

use std::path::Path;

use crate::cli::Cli;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::chronicle::{Entry, EntryLog, JsonlEntryLog};
use chronicle_core::config::ChronicleConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::partition::partition;

fn id_range(part: &[Entry]) -> serde_json::Value {
    serde_json::json!({
        "size": part.len(),
        "first": part.first().map(|e| e.id.as_str()),
        "last": part.last().map(|e| e.id.as_str()),
    })
}

/// Execute the partition command
///
/// Uses the store's configured part size when the store exists; no store is
/// required otherwise.
pub fn execute(
    cli: &Cli,
    store_path: &Path,
    entries_path: &Path,
    part_size: Option<usize>,
) -> Result<()> {
    let part_size = match part_size {
        Some(0) => {
            return Err(ChronicleError::invalid_value(
                "part size",
                "0 (must be at least 1)",
            ))
        }
        Some(n) => n,
        None => ChronicleConfig::load_or_default(store_path)?.chronicle.part_size,
    };

    let entries = JsonlEntryLog::new(entries_path).list_entries()?;
    let layout = partition(&entries, part_size);

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "entries": entries.len(),
            "partSize": part_size,
            "closedParts": layout.closed_parts.iter().map(|p| id_range(p)).collect::<Vec<_>>(),
            "openPart": id_range(layout.open_part),
        })),
        human => {
            println!(
                "{} entries, part size {}: {} closed parts, {} open",
                entries.len(),
                part_size,
                layout.closed_count(),
                layout.open_part.len()
            );
            for (i, part) in layout.closed_parts.iter().enumerate() {
                let first = part.first().map(|e| e.id.as_str()).unwrap_or("");
                let last = part.last().map(|e| e.id.as_str()).unwrap_or("");
                println!("  part {}: {} .. {}", i + 1, first, last);
            }
        }
    )
}

//! `chronicle show` command - print one cached summary

use crate::cli::Cli;
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::summary::SummaryCache;

/// Execute the show command
pub fn execute(cli: &Cli, store: &StoreHandle, key: &str) -> Result<()> {
    let bucket = store.summaries();
    let summary = SummaryCache::new(&bucket)
        .get(key)?
        .ok_or_else(|| ChronicleError::not_found("summary", key))?;

    output_by_format_result!(cli.format,
        json => print_json(&summary),
        human => {
            if !cli.quiet {
                println!("{}", summary.key);
                println!(
                    "{} -> {} words ({:.0}%), fingerprint {}, created {}",
                    summary.original_word_count,
                    summary.summary_word_count,
                    summary.compression_ratio * 100.0,
                    summary.content_fingerprint,
                    summary.created_at.to_rfc3339()
                );
                if let Some(meta) = &summary.metadata {
                    println!(
                        "meta-summary of {}: {}",
                        meta.source_count,
                        meta.included_keys.join(", ")
                    );
                }
                println!();
            }
            println!("{}", summary.content);
        }
    )
}

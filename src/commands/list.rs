//! `chronicle list` command - list cached summaries

use crate::cli::Cli;
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::error::Result;
use chronicle_core::summary::SummaryCache;

/// Execute the list command
pub fn execute(cli: &Cli, store: &StoreHandle, prefix: Option<&str>) -> Result<()> {
    let bucket = store.summaries();
    let summaries = SummaryCache::new(&bucket).get_by_prefix(prefix.unwrap_or(""))?;

    output_by_format_result!(cli.format,
        json => {
            let items: Vec<_> = summaries
                .values()
                .map(|s| {
                    serde_json::json!({
                        "key": s.key,
                        "originalWordCount": s.original_word_count,
                        "summaryWordCount": s.summary_word_count,
                        "meta": s.is_meta(),
                        "createdAt": s.created_at,
                    })
                })
                .collect();
            print_json(&items)
        },
        human => {
            if summaries.is_empty() {
                if !cli.quiet {
                    println!("No summaries");
                }
            } else {
                for (key, summary) in &summaries {
                    let marker = if summary.is_meta() { " (meta)" } else { "" };
                    println!(
                        "{}  {} -> {} words{}",
                        key, summary.original_word_count, summary.summary_word_count, marker
                    );
                }
            }
        }
    )
}

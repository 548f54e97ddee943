//! `chronicle stats` command - aggregate cache figures

use crate::cli::Cli;
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::error::Result;
use chronicle_core::summary::SummaryCache;

/// Execute the stats command
pub fn execute(cli: &Cli, store: &StoreHandle) -> Result<()> {
    let bucket = store.summaries();
    let stats = SummaryCache::new(&bucket).stats()?;

    output_by_format_result!(cli.format,
        json => print_json(&stats),
        human => {
            println!("Summaries:          {}", stats.total_summaries);
            println!("Meta-summaries:     {}", stats.total_meta_summaries);
            println!("Summary words:      {}", stats.total_summary_words);
            println!("Original words:     {}", stats.total_original_words);
            println!("Avg compression:    {:.3}", stats.average_compression_ratio);
            println!("Storage efficiency: {:.3}", stats.storage_efficiency);
        }
    )
}

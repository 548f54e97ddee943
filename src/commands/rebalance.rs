//! `chronicle rebalance` command - consolidate summaries explicitly

use crate::cli::Cli;
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::error::Result;
use chronicle_core::summary::{
    RebalanceSkip, SummaryCache, SummaryContext, SummaryEngine, SummaryManager,
};

/// Execute the rebalance command
pub fn execute(cli: &Cli, store: &StoreHandle) -> Result<()> {
    let summarizer = store.summarizer();
    let engine = SummaryEngine::new(summarizer.as_ref(), store.config.summary.clone());
    let bucket = store.summaries();
    let cache = SummaryCache::new(&bucket);
    let ctx = SummaryContext {
        engine: &engine,
        cache: &cache,
    };

    let report = SummaryManager::new(store.config.summary.clone()).rebalance(&ctx)?;

    output_by_format_result!(cli.format,
        json => print_json(&report),
        human => {
            match report.skipped {
                Some(RebalanceSkip::WithinWordBudget) => {
                    println!("Nothing to do: summaries are within the word budget");
                }
                Some(RebalanceSkip::BelowSummaryCount) => {
                    println!("Nothing to do: too few summaries to consolidate");
                }
                None => {
                    for key in &report.meta_keys {
                        println!("created {}", key);
                    }
                    println!(
                        "Consolidated {} summaries into {} meta-summaries",
                        report.removed_keys.len(),
                        report.meta_keys.len()
                    );
                    if report.failed_batches > 0 {
                        println!("{} batches failed and were left in place", report.failed_batches);
                    }
                }
            }
        }
    )
}

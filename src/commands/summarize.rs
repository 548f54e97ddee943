//! `chronicle summarize` command - bring one item's summary up to date

use std::fs;
use std::io::{self, Read};

use crate::cli::{Cli, SummarizeArgs};
use crate::commands::dispatch::StoreHandle;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::summary::{
    ProcessOutcome, RejectReason, SummaryCache, SummaryContext, SummaryEngine, SummaryManager,
};

/// Execute the summarize command
pub fn execute(cli: &Cli, store: &StoreHandle, args: &SummarizeArgs) -> Result<()> {
    let content = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let summarizer = store.summarizer();
    let engine = SummaryEngine::new(summarizer.as_ref(), store.config.summary.clone());
    let bucket = store.summaries();
    let cache = SummaryCache::new(&bucket);
    let ctx = SummaryContext {
        engine: &engine,
        cache: &cache,
    };

    let manager = SummaryManager::new(store.config.summary.clone());
    let outcome = manager.process(&ctx, args.kind, &args.id, &content, args.force)?;
    let key = format!("{}:{}", args.kind, args.id);

    if let ProcessOutcome::Failed(reason) = &outcome {
        return Err(ChronicleError::Other(format!(
            "could not summarize {}: {}",
            key, reason
        )));
    }

    output_by_format_result!(cli.format,
        json => {
            let mut output = serde_json::json!({
                "status": outcome.status(),
                "key": key,
            });
            if let Some(summary) = outcome.summary() {
                output["summary"] = serde_json::to_value(summary)?;
            }
            if let ProcessOutcome::Rejected(reason) = &outcome {
                output["reason"] = serde_json::to_value(reason)?;
            }
            print_json(&output)
        },
        human => {
            match &outcome {
                ProcessOutcome::Rejected(RejectReason::TooShort { words, minimum }) => {
                    println!(
                        "rejected {}: too short ({} words, minimum {})",
                        key, words, minimum
                    );
                }
                _ => {
                    if !cli.quiet {
                        println!("{} {}", outcome.status(), key);
                    }
                    if let Some(summary) = outcome.summary() {
                        println!("{}", summary.content);
                    }
                }
            }
        }
    )
}

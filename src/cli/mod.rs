//! CLI argument parsing for chronicle
//!
//! Global flags: --store, --format, --quiet, --verbose, --log-level, --log-json

pub mod format;
pub mod parse;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use chronicle_core::kind::ContentKind;
use parse::parse_content_kind;

/// Output format for chronicle commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

/// Chronicle - incremental summaries for a journal
#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory (default: ./.chronicle)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `info`, `chronicle_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to stderr as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store directory, config and database
    Init,

    /// Summarize one content item, reusing the cached summary when unchanged
    Summarize(SummarizeArgs),

    /// Print one cached summary
    Show {
        /// Summary key, e.g. `entry:e1` or `entry-meta`
        key: String,
    },

    /// List cached summaries
    List {
        /// Only keys starting with this prefix (a trailing `*` is ignored)
        #[arg(long, short)]
        prefix: Option<String>,
    },

    /// Print cache statistics
    Stats,

    /// Consolidate old summaries into meta-summaries if the cache is over budget
    Rebalance,

    /// Show how an entry log splits into parts, without writing anything
    Partition {
        /// JSON-lines entry log
        #[arg(long)]
        entries: PathBuf,

        /// Entries per part (default: from config)
        #[arg(long)]
        part_size: Option<usize>,
    },

    /// Maintain the journal rollup
    Chronicle {
        #[command(subcommand)]
        command: ChronicleCommands,
    },
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Content kind: entry, character, location or topic
    #[arg(value_parser = parse_content_kind)]
    pub kind: ContentKind,

    /// Content id within the kind
    pub id: String,

    /// Read content from this file instead of stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Regenerate even if the content is unchanged
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct EntriesArgs {
    /// JSON-lines entry log
    #[arg(long)]
    pub entries: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ChronicleCommands {
    /// Close every part the entry log now fills
    Close(EntriesArgs),

    /// Refresh the summary of the open part
    Recent(EntriesArgs),

    /// Close due parts and repair missing summaries, titles and rollups
    Backfill(EntriesArgs),

    /// Show the rollup pointer, parts and rollups
    Status {
        /// JSON-lines entry log, to report pending parts
        #[arg(long)]
        entries: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "chronicle",
            "--format",
            "json",
            "summarize",
            "character",
            "mara",
            "--force",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Summarize(args)) => {
                assert_eq!(args.kind, ContentKind::Character);
                assert_eq!(args.id, "mara");
                assert!(args.force);
                assert!(args.file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = Cli::try_parse_from(["chronicle", "summarize", "journal", "x"]).unwrap_err();
        assert!(err.to_string().contains("content kind"));
    }

    #[test]
    fn test_chronicle_status_entries_optional() {
        let cli = Cli::try_parse_from(["chronicle", "chronicle", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Chronicle {
                command: ChronicleCommands::Status { entries: None }
            })
        ));
    }
}

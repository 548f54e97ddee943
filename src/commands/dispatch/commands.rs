//! Command implementations for all chronicle commands

use crate::cli::{ChronicleCommands, Commands};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{chronicle, init, list, partition, rebalance, show, stats, summarize};
use chronicle_core::error::Result;
use tracing::debug;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if let Commands::Init = self {
            return init::execute(ctx.cli, &ctx.store_path());
        }
        if let Commands::Partition { entries, part_size } = self {
            return partition::execute(ctx.cli, &ctx.store_path(), entries, *part_size);
        }

        let store = ctx.open_store()?;
        if ctx.cli.verbose {
            debug!(elapsed = ?ctx.start.elapsed(), "open_store");
        }

        let result = match self {
            Commands::Summarize(args) => summarize::execute(ctx.cli, &store, args),
            Commands::Show { key } => show::execute(ctx.cli, &store, key),
            Commands::List { prefix } => list::execute(ctx.cli, &store, prefix.as_deref()),
            Commands::Stats => stats::execute(ctx.cli, &store),
            Commands::Rebalance => rebalance::execute(ctx.cli, &store),
            Commands::Chronicle { command } => match command {
                ChronicleCommands::Close(args) => chronicle::close(ctx.cli, &store, &args.entries),
                ChronicleCommands::Recent(args) => {
                    chronicle::recent(ctx.cli, &store, &args.entries)
                }
                ChronicleCommands::Backfill(args) => {
                    chronicle::backfill(ctx.cli, &store, &args.entries)
                }
                ChronicleCommands::Status { entries } => {
                    chronicle::status(ctx.cli, &store, entries.as_deref())
                }
            },
            Commands::Init | Commands::Partition { .. } => Ok(()),
        };

        if ctx.cli.verbose {
            debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        }
        result
    }
}

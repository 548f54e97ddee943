//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use chronicle_core::config::ChronicleConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::store::{resolve_store_path, Database, SqliteStore, CHRONICLE_BUCKET, SUMMARY_BUCKET};
use chronicle_core::summarizer::{DisabledSummarizer, HttpSummarizer, Summarizer};

/// An opened store: its config and database
pub struct StoreHandle {
    pub root: PathBuf,
    pub config: ChronicleConfig,
    pub db: Database,
}

impl StoreHandle {
    /// Open an existing store directory
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(ChronicleError::StoreNotFound {
                path: root.display().to_string(),
            });
        }
        let config = ChronicleConfig::load_or_default(root)?;
        let db = Database::open(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            db,
        })
    }

    /// Bucket holding per-item summaries
    pub fn summaries(&self) -> SqliteStore {
        self.db.bucket(SUMMARY_BUCKET)
    }

    /// Bucket holding parts and rollups
    pub fn chronicle(&self) -> SqliteStore {
        self.db.bucket(CHRONICLE_BUCKET)
    }

    /// The configured summarizer, or one that is always unavailable
    pub fn summarizer(&self) -> Box<dyn Summarizer> {
        if self.config.summarizer.endpoint.is_empty() {
            tracing::debug!("no summarizer endpoint configured");
            Box::new(DisabledSummarizer)
        } else {
            Box::new(HttpSummarizer::new(self.config.summarizer.clone()))
        }
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Store directory from `--store`, or `.chronicle` under the root
    pub fn store_path(&self) -> PathBuf {
        let path = resolve_store_path(self.cli.store.as_deref(), self.root);
        if path.is_absolute() {
            path
        } else {
            self.root.join(path)
        }
    }

    pub fn open_store(&self) -> Result<StoreHandle> {
        StoreHandle::open(&self.store_path())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("chronicle {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Incremental summaries for a journal.");
        println!();
        println!("Run `chronicle --help` for usage information.");
        Ok(())
    }
}

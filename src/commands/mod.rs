//! Command implementations for chronicle

pub mod chronicle;
pub mod dispatch;
pub mod init;
pub mod list;
pub mod partition;
pub mod rebalance;
pub mod show;
pub mod stats;
pub mod summarize;

use chronicle_core::error::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

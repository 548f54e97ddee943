//! Chronicle Core Library
//!
//! Incremental, cached summarization for a journal: per-item summaries with
//! fingerprint-based change detection, consolidation into meta-summaries,
//! and a hierarchical rollup of the entry log in fixed-size parts.

pub mod chronicle;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod kind;
pub mod logging;
pub mod partition;
pub mod store;
pub mod summarizer;
pub mod summary;
pub mod text;

#[cfg(test)]
mod testutil;

pub use error::{ChronicleError, ExitCode, Result};

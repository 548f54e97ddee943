//! The journal chronicle: parts, rollups and the entries behind them
//!
//! The entry log is split into fixed-size parts. Each closed part keeps its
//! member ids, a summary and a title; on top sit a cumulative summary of all
//! closed parts and a summary of the still-open part. All of it lives in the
//! chronicle store under the keys in [`keys`].

mod aggregator;
mod entry;
pub mod keys;
mod part;
mod state;

pub use aggregator::{BackfillReport, ChronicleAggregator};
pub use entry::{Entry, EntryLog, JsonlEntryLog};
pub use part::{sanitize_title, Part, PartStore};
pub use state::ChronicleState;

use crate::store::KeyValueStore;
use crate::summary::SummaryEngine;

/// Everything an aggregator call needs; passed explicitly on every call
pub struct ChronicleContext<'a> {
    pub engine: &'a SummaryEngine<'a>,
    pub store: &'a dyn KeyValueStore,
}

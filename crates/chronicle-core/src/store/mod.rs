//! Durable key-value storage
//!
//! The summarization layers only need point reads, point writes, deletes and
//! prefix listing. Values are JSON text; each write replaces the whole value.

mod memory;
mod schema;
mod sqlite;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ChronicleError, Result};

pub use memory::MemoryStore;
pub use schema::CURRENT_SCHEMA_VERSION;
pub use sqlite::{Database, SqliteStore, DB_FILE};

/// Bucket holding per-item summaries and meta-summaries
pub const SUMMARY_BUCKET: &str = "summaries";

/// Bucket holding journal parts and rollups
pub const CHRONICLE_BUCKET: &str = "chronicle";

/// Default store directory, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = ".chronicle";

/// A synchronous key-value store with prefix listing
pub trait KeyValueStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any existing one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;

    /// All keys starting with `prefix`, in ascending order
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Read and decode a JSON value
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ChronicleError::storage(&format!("decode {}", key), e)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Resolve the store directory: explicit path, or `.chronicle` under `root`
pub fn resolve_store_path(explicit: Option<&Path>, root: &Path) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => root.join(DEFAULT_STORE_DIR),
    }
}

//! Store configuration for chronicle
//!
//! Configuration lives in `config.toml` inside the store root. Every field
//! has a default, so a missing file or a partial file is fine.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{ChronicleError, Result};

pub use types::{ChronicleConfig, PartConfig, SummarizerConfig, SummaryConfig};

/// Name of the configuration file inside a store
pub const CONFIG_FILE: &str = "config.toml";

/// Environment override for the summarizer endpoint
pub const ENDPOINT_ENV_VAR: &str = "CHRONICLE_SUMMARIZER_ENDPOINT";

/// Upper bound for `summarizer.max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

impl ChronicleConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: ChronicleConfig = toml::from_str(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a store root, falling back to defaults
    pub fn load_or_default(store_root: &Path) -> Result<Self> {
        let path = store_root.join(CONFIG_FILE);
        if path.exists() {
            return Self::load(&path);
        }
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChronicleError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.is_empty() {
                self.summarizer.endpoint = endpoint;
            }
        }
    }

    /// Reject settings the summarization layers cannot work with
    pub fn validate(&self) -> Result<()> {
        let summary = &self.summary;
        if self.chronicle.part_size == 0 {
            bail_invalid!("chronicle.part_size", "0 (must be at least 1)");
        }
        if summary.meta_trigger_count < 2 {
            bail_invalid!(
                "summary.meta_trigger_count",
                format!("{} (must be at least 2)", summary.meta_trigger_count)
            );
        }
        if summary.min_target_words > summary.default_target_words {
            bail_invalid!(
                "summary.min_target_words",
                format!(
                    "{} (exceeds default_target_words {})",
                    summary.min_target_words, summary.default_target_words
                )
            );
        }
        if !(summary.compression_ratio > 0.0 && summary.compression_ratio <= 1.0) {
            bail_invalid!(
                "summary.compression_ratio",
                format!("{} (must be in (0, 1])", summary.compression_ratio)
            );
        }
        if self.chronicle.title_max_words == 0 {
            bail_invalid!("chronicle.title_max_words", "0 (must be at least 1)");
        }
        if self.summarizer.max_retries > MAX_RETRIES_LIMIT {
            bail_invalid!(
                "summarizer.max_retries",
                format!(
                    "{} (must be at most {})",
                    self.summarizer.max_retries, MAX_RETRIES_LIMIT
                )
            );
        }
        Ok(())
    }
}

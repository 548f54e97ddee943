//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Store configuration, read from `config.toml` in the store root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChronicleConfig {
    /// Per-item summarization and consolidation thresholds
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Journal partitioning and rollup settings
    #[serde(default)]
    pub chronicle: PartConfig,

    /// Summarizer endpoint settings
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

/// Thresholds for individual summaries and meta-summary consolidation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Content shorter than this is not worth summarizing
    #[serde(default = "default_min_words_for_summary")]
    pub min_words_for_summary: usize,

    /// Upper clamp for the target length of a single summary
    #[serde(default = "default_target_words")]
    pub default_target_words: usize,

    /// Lower clamp for the target length of a single summary
    #[serde(default = "default_min_target_words")]
    pub min_target_words: usize,

    /// Fraction of the original word count to aim for
    #[serde(default = "default_compression_ratio")]
    pub compression_ratio: f64,

    /// Target length of a meta-summary
    #[serde(default = "default_meta_target_words")]
    pub meta_target_words: usize,

    /// Total cached summary words tolerated before consolidating
    #[serde(default = "default_target_total_words")]
    pub target_total_words: usize,

    /// Cached summary count tolerated before consolidating
    #[serde(default = "default_max_summaries_before_meta")]
    pub max_summaries_before_meta: usize,

    /// Group size that triggers consolidation, and the batch size used
    #[serde(default = "default_meta_trigger_count")]
    pub meta_trigger_count: usize,
}

/// Journal partitioning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    /// Entries per closed part
    #[serde(default = "default_part_size")]
    pub part_size: usize,

    /// Target length of a part summary
    #[serde(default = "default_long_target_words")]
    pub part_target_words: usize,

    /// Maximum words in a part title
    #[serde(default = "default_title_max_words")]
    pub title_max_words: usize,

    /// Target length of the cumulative so-far summary
    #[serde(default = "default_long_target_words")]
    pub rollup_target_words: usize,

    /// Target length of the open-part recent summary
    #[serde(default = "default_long_target_words")]
    pub recent_target_words: usize,
}

/// Settings for the HTTP summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Chat-completions URL; empty disables the summarizer
    #[serde(default)]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry attempts for transport errors and 5xx responses
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_min_words_for_summary() -> usize {
    200
}

fn default_target_words() -> usize {
    50
}

fn default_min_target_words() -> usize {
    10
}

fn default_compression_ratio() -> f64 {
    0.2
}

fn default_meta_target_words() -> usize {
    100
}

fn default_target_total_words() -> usize {
    500
}

fn default_max_summaries_before_meta() -> usize {
    15
}

fn default_meta_trigger_count() -> usize {
    10
}

fn default_part_size() -> usize {
    20
}

fn default_long_target_words() -> usize {
    1000
}

fn default_title_max_words() -> usize {
    12
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "CHRONICLE_API_KEY".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_words_for_summary: default_min_words_for_summary(),
            default_target_words: default_target_words(),
            min_target_words: default_min_target_words(),
            compression_ratio: default_compression_ratio(),
            meta_target_words: default_meta_target_words(),
            target_total_words: default_target_total_words(),
            max_summaries_before_meta: default_max_summaries_before_meta(),
            meta_trigger_count: default_meta_trigger_count(),
        }
    }
}

impl Default for PartConfig {
    fn default() -> Self {
        Self {
            part_size: default_part_size(),
            part_target_words: default_long_target_words(),
            title_max_words: default_title_max_words(),
            rollup_target_words: default_long_target_words(),
            recent_target_words: default_long_target_words(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

//! The text-condensing capability
//!
//! The summarization layers never condense text themselves. They hand a
//! [`SummaryRequest`] to an injected [`Summarizer`] and treat every error as
//! "no summary available".

mod http;

pub use http::HttpSummarizer;

/// One condensing call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest<'a> {
    /// Text to condense
    pub text: &'a str,
    /// Desired length of the result, in words
    pub target_words: usize,
    /// Instruction describing what to keep
    pub guidance: &'a str,
}

/// Why a summarizer could not produce text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizerError {
    /// No credentials, or summarization is not enabled
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),

    /// Transport, quota, timeout or malformed response
    #[error("summarizer failed: {0}")]
    Failure(String),
}

/// Something that can condense text to roughly a target length
pub trait Summarizer {
    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, SummarizerError>;
}

/// Summarizer that is never available; used when no endpoint is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSummarizer;

impl Summarizer for DisabledSummarizer {
    fn summarize(&self, _request: &SummaryRequest<'_>) -> Result<String, SummarizerError> {
        Err(SummarizerError::Unavailable(
            "no summarizer endpoint configured".to_string(),
        ))
    }
}

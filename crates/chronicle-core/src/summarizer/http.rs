//! OpenAI-compatible chat-completions summarizer
//!
//! Synchronous client with a per-request timeout and exponential backoff.
//! Client errors are not retried, except 429.

use std::time::Duration;

use serde::Deserialize;

use super::{Summarizer, SummarizerError, SummaryRequest};
use crate::config::SummarizerConfig;

/// Base delay for retry backoff
const RETRY_BASE_MILLIS: u64 = 100;

/// Longest single backoff sleep
const RETRY_MAX_MILLIS: u64 = 30_000;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for a chat-completions endpoint
pub struct HttpSummarizer {
    config: SummarizerConfig,
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpSummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .http_status_as_error(false)
            .build()
            .into();
        let user_agent = format!(
            "chronicle/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self {
            config,
            agent,
            user_agent,
        }
    }

    /// Check if an endpoint and API key are present
    pub fn is_configured(&self) -> bool {
        !self.config.endpoint.is_empty() && self.api_key().is_some()
    }

    fn api_key(&self) -> Option<String> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
    }

    fn build_payload(&self, request: &SummaryRequest<'_>) -> serde_json::Value {
        let system = format!(
            "{}\nRespond with the summary only, in about {} words.",
            request.guidance, request.target_words
        );
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": request.text },
            ],
            "max_tokens": request.target_words * 2 + 64,
        })
    }

    fn send_once(&self, payload: &str, api_key: &str) -> Result<String, SummarizerError> {
        let response = self
            .agent
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key).as_str())
            .header("User-Agent", self.user_agent.as_str())
            .send(payload);

        let mut res = match response {
            Ok(res) => res,
            Err(e) => {
                return Err(SummarizerError::Failure(format!("transport error: {}", e)));
            }
        };

        check_status(res.status().as_u16())?;

        let body = res
            .body_mut()
            .read_to_string()
            .map_err(|e| SummarizerError::Failure(format!("failed to read response: {}", e)))?;
        parse_completion(&body)
    }
}

/// Map a response status to the error the retry loop acts on
///
/// 429 and 5xx are `Failure` and get retried; other client errors are
/// `Unavailable` and end the call.
fn check_status(status: u16) -> Result<(), SummarizerError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(SummarizerError::Failure(
            "rate limited by endpoint (status 429)".to_string(),
        )),
        400..=499 => Err(SummarizerError::Unavailable(format!(
            "endpoint rejected request with status {}",
            status
        ))),
        _ => Err(SummarizerError::Failure(format!(
            "server returned status {}",
            status
        ))),
    }
}

/// Sleep before retry `attempt` (1-based): 100ms doubling, capped
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2_u64.checked_pow(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(RETRY_BASE_MILLIS.saturating_mul(factor).min(RETRY_MAX_MILLIS))
}

/// Extract the first choice's text from a chat-completions response body
fn parse_completion(body: &str) -> Result<String, SummarizerError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SummarizerError::Failure(format!("malformed response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| SummarizerError::Failure("empty completion".to_string()))
}

impl Summarizer for HttpSummarizer {
    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, SummarizerError> {
        if self.config.endpoint.is_empty() {
            return Err(SummarizerError::Unavailable(
                "no summarizer endpoint configured".to_string(),
            ));
        }
        let Some(api_key) = self.api_key() else {
            return Err(SummarizerError::Unavailable(format!(
                "{} is not set",
                self.config.api_key_env
            )));
        };

        let payload = self.build_payload(request).to_string();
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
            }

            match self.send_once(&payload, &api_key) {
                Ok(text) => return Ok(text),
                Err(e @ SummarizerError::Unavailable(_)) => return Err(e),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "summarizer request failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| SummarizerError::Failure("no attempt was made".to_string())))
    }
}

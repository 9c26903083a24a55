//! LLM client configuration for OpenAI-compatible APIs.
//!
//! Groq exposes the same wire format as OpenAI, so a single client covers
//! both chat completions and Whisper transcription.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for LLM API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Resolve the API key from the environment.
///
/// `GROQ_API_KEY` takes precedence; `OPENAI_API_KEY` is the fallback so the
/// same binary works against either provider.
pub fn api_key() -> Option<String> {
    std::env::var("GROQ_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .ok()
        .filter(|k| !k.is_empty())
}

/// Create a client with configured timeout against the given API base.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client(api_base: Option<&str>) -> Client<OpenAIConfig> {
    create_client_with_timeout(api_base, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    api_base: Option<&str>,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let mut config = OpenAIConfig::default();
    if let Some(key) = api_key() {
        config = config.with_api_key(key);
    }
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    Client::with_config(config).with_http_client(http_client)
}

/// Check if an API key is configured in the environment.
pub fn is_api_key_configured() -> bool {
    api_key().is_some()
}

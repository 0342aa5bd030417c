//! Concrete HTTP providers.
//!
//! Request bodies and response parsing are pure functions so they can be
//! tested without a network.

pub mod anthropic;
pub mod chat_completions;

pub use anthropic::AnthropicClient;
pub use chat_completions::ChatCompletionsClient;

use std::time::Duration;

use minutes_core::errors::{MinutesResult, ProviderError};
use minutes_core::models::ProviderKind;

/// Text and usage extracted from one completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub tokens_used: Option<u32>,
}

/// Characters of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 300;

pub(crate) fn http_client(kind: ProviderKind, timeout: Duration) -> MinutesResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("minutes/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            ProviderError::RequestFailed {
                provider: kind.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            }
            .into()
        })
}

pub(crate) fn transport_error(kind: ProviderKind, timeout: Duration, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider: kind.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        ProviderError::RequestFailed {
            provider: kind.to_string(),
            reason: err.to_string(),
        }
    }
}

pub(crate) fn status_error(kind: ProviderKind, status: reqwest::StatusCode, body: &str) -> ProviderError {
    let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    ProviderError::RequestFailed {
        provider: kind.to_string(),
        reason: format!("status {status}: {body}"),
    }
}

pub(crate) fn invalid(kind: ProviderKind, reason: impl Into<String>) -> ProviderError {
    ProviderError::InvalidResponse {
        provider: kind.to_string(),
        reason: reason.into(),
    }
}

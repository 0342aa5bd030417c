use serde::{Deserialize, Serialize};

use super::ProviderKind;

/// Why an orchestrated request produced no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFailure {
    /// No providers were configured, nothing was attempted.
    NotConfigured,
    /// Every configured provider was attempted and failed.
    AllProvidersFailed,
    /// The request needed a session and none was active.
    NoActiveSession,
}

/// Uniform answer shape reported by every provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub success: bool,
    pub content: String,
    pub provider: Option<ProviderKind>,
    pub error: Option<String>,
    /// Set only on synthetic failures produced by the orchestrator.
    pub failure: Option<ResponseFailure>,
    pub tokens_used: Option<u32>,
    pub latency_ms: Option<u64>,
}

impl ProviderResponse {
    pub fn ok(provider: ProviderKind, content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            provider: Some(provider),
            error: None,
            failure: None,
            tokens_used: None,
            latency_ms: None,
        }
    }

    /// A provider-level failure (the provider answered but flagged an error).
    pub fn failed(provider: ProviderKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            provider: Some(provider),
            error: Some(error.into()),
            failure: None,
            tokens_used: None,
            latency_ms: None,
        }
    }

    pub fn not_configured() -> Self {
        Self::synthetic(
            ResponseFailure::NotConfigured,
            "no AI providers are configured".to_string(),
        )
    }

    pub fn all_failed(attempted: usize, last_error: Option<String>) -> Self {
        let error = match last_error {
            Some(e) => format!("all {attempted} providers failed; last error: {e}"),
            None => format!("all {attempted} providers failed"),
        };
        Self::synthetic(ResponseFailure::AllProvidersFailed, error)
    }

    pub fn no_active_session() -> Self {
        Self::synthetic(
            ResponseFailure::NoActiveSession,
            "no active session".to_string(),
        )
    }

    pub fn with_telemetry(mut self, tokens_used: Option<u32>, latency_ms: Option<u64>) -> Self {
        self.tokens_used = tokens_used;
        self.latency_ms = latency_ms;
        self
    }

    fn synthetic(failure: ResponseFailure, error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            provider: None,
            error: Some(error),
            failure: Some(failure),
            tokens_used: None,
            latency_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_failures_are_distinguishable() {
        let a = ProviderResponse::not_configured();
        let b = ProviderResponse::all_failed(3, Some("boom".into()));
        assert!(!a.success && !b.success);
        assert_ne!(a.failure, b.failure);
        assert!(b.error.unwrap().contains("boom"));
    }
}

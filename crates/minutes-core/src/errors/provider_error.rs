/// Text-generation provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No provider credentials are configured.
    #[error("no providers configured")]
    NotConfigured,

    /// Every configured provider was tried and failed.
    #[error("all {attempted} providers failed")]
    Exhausted { attempted: usize },

    #[error("request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("request to {provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ProviderKind;

/// Credentials and endpoint for one provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderCredential {
    pub kind: ProviderKind,
    pub api_key: String,
    /// Model override; each client has its own default.
    #[serde(default)]
    pub model: Option<String>,
    /// Endpoint override, e.g. a self-hosted OpenAI-compatible server.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderCredential {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            model: None,
            base_url: None,
        }
    }
}

// Keys never reach logs.
impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredential")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Provider orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Tried first when configured.
    pub preferred: Option<ProviderKind>,
    /// Per-call timeout enforced by the orchestrator.
    pub request_timeout_secs: u64,
    /// Also pick up `MINUTES_<KIND>_API_KEY` variables.
    pub load_env_credentials: bool,
    pub credentials: Vec<ProviderCredential>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            preferred: None,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            load_env_credentials: defaults::DEFAULT_LOAD_ENV_CREDENTIALS,
            credentials: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let cred = ProviderCredential::new(ProviderKind::OpenAi, "sk-secret-value");
        let rendered = format!("{cred:?}");
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}

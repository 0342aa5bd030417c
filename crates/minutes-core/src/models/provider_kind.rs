use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MinutesError;

/// Supported text-generation backends.
///
/// Declaration order is the stable fallback order for non-preferred providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    Groq,
    OpenRouter,
    Local,
}

impl ProviderKind {
    /// All kinds in stable fallback order.
    pub const ALL: [ProviderKind; 6] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::Gemini,
        Self::Groq,
        Self::OpenRouter,
        Self::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::OpenRouter => "openrouter",
            Self::Local => "local",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env_var(&self) -> String {
        format!("MINUTES_{}_API_KEY", self.as_str().to_uppercase())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = MinutesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| MinutesError::ConfigError(format!("unknown provider kind: {s}")))
    }
}

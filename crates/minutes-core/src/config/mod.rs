//! Layered configuration. Every section defaults, so an empty TOML document
//! is a valid configuration.

pub mod defaults;

mod compaction_config;
mod minutes_config;
mod observability_config;
mod provider_config;
mod runtime_config;
mod session_config;

pub use compaction_config::CompactionConfig;
pub use minutes_config::GeneratorConfig;
pub use observability_config::ObservabilityConfig;
pub use provider_config::{ProviderConfig, ProviderCredential};
pub use runtime_config::RuntimeConfig;
pub use session_config::SessionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{MinutesError, MinutesResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutesConfig {
    pub session: SessionConfig,
    pub compaction: CompactionConfig,
    pub providers: ProviderConfig,
    pub minutes: GeneratorConfig,
    pub runtime: RuntimeConfig,
    pub observability: ObservabilityConfig,
}

impl MinutesConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml(source: &str) -> MinutesResult<Self> {
        toml::from_str(source).map_err(|e| MinutesError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> MinutesResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            MinutesError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&source)
    }
}

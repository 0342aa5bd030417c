use serde::{Deserialize, Serialize};

use super::defaults;

/// Context store bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Raw chunks retained after each post-append trim.
    pub max_recent_chunks: usize,
    /// Recent chunks rendered into the condensed context.
    pub condensed_recent_chunks: usize,
    /// Micro-summaries rendered into the condensed context.
    pub condensed_micro_summaries: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_recent_chunks: defaults::DEFAULT_MAX_RECENT_CHUNKS,
            condensed_recent_chunks: defaults::DEFAULT_CONDENSED_RECENT_CHUNKS,
            condensed_micro_summaries: defaults::DEFAULT_CONDENSED_MICRO_SUMMARIES,
        }
    }
}

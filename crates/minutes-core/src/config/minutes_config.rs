use serde::{Deserialize, Serialize};

use super::defaults;

/// Minutes generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sessions shorter than this get a locally synthesized summary.
    pub short_session_minutes: i64,
    /// Opening chunks used for the short-session summary.
    pub intro_chunks: usize,
    /// Transcript characters sampled by the templated fallback.
    pub fallback_sample_chars: usize,
    /// Ask providers for JSON decision/action lists.
    pub structured_extraction: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            short_session_minutes: defaults::DEFAULT_SHORT_SESSION_MINUTES,
            intro_chunks: defaults::DEFAULT_INTRO_CHUNKS,
            fallback_sample_chars: defaults::DEFAULT_FALLBACK_SAMPLE_CHARS,
            structured_extraction: defaults::DEFAULT_STRUCTURED_EXTRACTION,
        }
    }
}

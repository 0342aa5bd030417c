use serde::{Deserialize, Serialize};

use super::defaults;

/// Compaction scheduler thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Retained chunks required before a micro compaction.
    pub micro_min_chunks: usize,
    /// Minimum seconds between micro compactions.
    pub micro_interval_secs: u64,
    pub micro_max_words: usize,
    /// Micro-summaries folded per section compaction.
    pub section_batch_size: usize,
    /// Minimum seconds between section compactions.
    pub section_interval_secs: u64,
    pub section_max_words: usize,
}

impl CompactionConfig {
    pub fn micro_interval_ms(&self) -> i64 {
        (self.micro_interval_secs as i64).saturating_mul(1000)
    }

    pub fn section_interval_ms(&self) -> i64 {
        (self.section_interval_secs as i64).saturating_mul(1000)
    }
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            micro_min_chunks: defaults::DEFAULT_MICRO_MIN_CHUNKS,
            micro_interval_secs: defaults::DEFAULT_MICRO_INTERVAL_SECS,
            micro_max_words: defaults::DEFAULT_MICRO_MAX_WORDS,
            section_batch_size: defaults::DEFAULT_SECTION_BATCH_SIZE,
            section_interval_secs: defaults::DEFAULT_SECTION_INTERVAL_SECS,
            section_max_words: defaults::DEFAULT_SECTION_MAX_WORDS,
        }
    }
}

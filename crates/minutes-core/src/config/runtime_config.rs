use serde::{Deserialize, Serialize};

use super::defaults;

/// Task scheduling for the meeting runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// How long session end waits for in-flight compaction.
    pub end_grace_period_secs: u64,
    /// Interval of the duration refresh ticker. Zero disables it.
    pub duration_refresh_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            end_grace_period_secs: defaults::DEFAULT_END_GRACE_PERIOD_SECS,
            duration_refresh_secs: defaults::DEFAULT_DURATION_REFRESH_SECS,
        }
    }
}

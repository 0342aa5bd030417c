//! Central metrics registry.
//!
//! [`MetricsCollector`] owns the domain-specific collectors.

pub mod compaction_metrics;
pub mod provider_metrics;
pub mod session_metrics;

pub use compaction_metrics::{AttemptOutcome, CompactionMetrics, LevelCounters};
pub use provider_metrics::{CallOutcome, ProviderCallStats, ProviderMetrics};
pub use session_metrics::SessionMetrics;

/// Central metrics registry that owns all domain-specific collectors.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub compaction: CompactionMetrics,
    pub providers: ProviderMetrics,
    pub session: SessionMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! [`ObservabilityEngine`] owns metrics and degradation tracking.

use minutes_core::errors::{MinutesError, MinutesResult};
use minutes_core::models::DegradationEvent;

use crate::degradation::{evaluate_alerts, DegradationAlert, DegradationTracker};
use crate::metrics::{MetricsCollector, ProviderMetrics};

/// Central observability state for one runtime.
#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MetricsCollector,
    pub degradation: DegradationTracker,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degradation event.
    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.degradation.record(event);
    }

    /// Mark a component as recovered from degradation.
    pub fn mark_recovered(&mut self, component: &str) {
        self.degradation.mark_recovered(component);
    }

    pub fn degradation_alerts(&self) -> Vec<DegradationAlert> {
        evaluate_alerts(&self.degradation)
    }

    /// Replace the provider metrics with a fresh snapshot.
    pub fn set_provider_metrics(&mut self, providers: ProviderMetrics) {
        self.metrics.providers = providers;
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Serialize current metrics and degradation counts to JSON.
    pub fn metrics_snapshot(&self) -> MinutesResult<serde_json::Value> {
        let metrics_json =
            serde_json::to_value(&self.metrics).map_err(MinutesError::SerializationError)?;
        Ok(serde_json::json!({
            "metrics": metrics_json,
            "degradations_total": self.degradation.events().len(),
            "degradations_active": self.degradation.active_degradations().len(),
        }))
    }
}

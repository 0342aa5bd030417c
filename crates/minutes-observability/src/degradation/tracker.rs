//! Record every provider fallback: component, failure, fallback used, timestamp, recovery status.

use chrono::{DateTime, Utc};
use minutes_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// The primary path succeeded again.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Tracks degradation events for alerting and reporting.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut recovered = 0;
        for tracked in self.events.iter_mut().filter(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        }) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
            recovered += 1;
        }
        if recovered > 0 {
            crate::tracing_setup::events::degradation_recovered(component, recovered);
        }
        recovered
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Count events in the last N seconds for a given component.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// How long a component has been continuously degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(component: &str) -> DegradationEvent {
        DegradationEvent {
            component: component.to_string(),
            failure: "openai failed".to_string(),
            fallback_used: "groq".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn recovery_clears_active_degradations() {
        let mut tracker = DegradationTracker::new();
        tracker.record(event("providers.summary"));
        tracker.record(event("providers.summary"));
        tracker.record(event("providers.answer"));
        assert_eq!(tracker.active_degradations().len(), 3);

        assert_eq!(tracker.mark_recovered("providers.summary"), 2);
        assert_eq!(tracker.active_degradations().len(), 1);
        assert!(tracker.degraded_duration("providers.summary").is_none());
        assert!(tracker.degraded_duration("providers.answer").is_some());
        assert_eq!(tracker.count_recent("providers.summary", 60), 2);
    }
}

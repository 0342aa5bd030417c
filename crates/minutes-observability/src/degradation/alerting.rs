//! Alert thresholds: more than 3 fallbacks in 10 minutes → warning, degraded for over an hour → critical.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tracker::DegradationTracker;

const WARNING_WINDOW_SECS: i64 = 600;
const WARNING_THRESHOLD: usize = 3;
const CRITICAL_AFTER_MINUTES: i64 = 60;

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

/// A degradation alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationAlert {
    pub level: AlertLevel,
    pub component: String,
    pub message: String,
}

/// Evaluate alerts from the current tracker state, one per component at most.
pub fn evaluate_alerts(tracker: &DegradationTracker) -> Vec<DegradationAlert> {
    let mut alerts = Vec::new();
    let mut seen = HashSet::new();

    for tracked in tracker.events() {
        let component = &tracked.event.component;
        if !seen.insert(component.clone()) {
            continue;
        }

        if let Some(duration) = tracker.degraded_duration(component) {
            if duration > chrono::Duration::minutes(CRITICAL_AFTER_MINUTES) {
                alerts.push(DegradationAlert {
                    level: AlertLevel::Critical,
                    component: component.clone(),
                    message: format!(
                        "{component} has been degraded for over {CRITICAL_AFTER_MINUTES} minutes"
                    ),
                });
                continue;
            }
        }

        let recent = tracker.count_recent(component, WARNING_WINDOW_SECS);
        if recent > WARNING_THRESHOLD {
            alerts.push(DegradationAlert {
                level: AlertLevel::Warning,
                component: component.clone(),
                message: format!("{component} fell back {recent} times in the last 10 minutes"),
            });
        }
    }

    alerts
}

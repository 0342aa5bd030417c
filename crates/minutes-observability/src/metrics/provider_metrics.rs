//! Per-provider call counts, timeouts, and latency.

use std::collections::BTreeMap;
use std::time::Duration;

use minutes_core::models::ProviderKind;
use serde::{Deserialize, Serialize};

/// How one provider call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallOutcome {
    Success,
    Failure,
    Timeout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCallStats {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    pub timeouts: u64,
    pub total_latency_ms: u64,
}

impl ProviderCallStats {
    pub fn avg_latency(&self) -> Duration {
        if self.attempts == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.total_latency_ms / self.attempts)
    }

    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.successes as f64 / self.attempts as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderMetrics {
    per_provider: BTreeMap<ProviderKind, ProviderCallStats>,
}

impl ProviderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ProviderKind, outcome: CallOutcome, latency: Duration) {
        let stats = self.per_provider.entry(kind).or_default();
        stats.attempts += 1;
        stats.total_latency_ms += latency.as_millis() as u64;
        match outcome {
            CallOutcome::Success => stats.successes += 1,
            CallOutcome::Failure => stats.failures += 1,
            CallOutcome::Timeout => stats.timeouts += 1,
        }
    }

    pub fn stats(&self, kind: ProviderKind) -> ProviderCallStats {
        self.per_provider.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_attempts(&self) -> u64 {
        self.per_provider.values().map(|s| s.attempts).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProviderKind, &ProviderCallStats)> {
        self.per_provider.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_by_kind() {
        let mut m = ProviderMetrics::new();
        m.record(ProviderKind::Groq, CallOutcome::Success, Duration::from_millis(100));
        m.record(ProviderKind::Groq, CallOutcome::Timeout, Duration::from_millis(300));
        m.record(ProviderKind::OpenAi, CallOutcome::Failure, Duration::from_millis(10));

        let groq = m.stats(ProviderKind::Groq);
        assert_eq!(groq.attempts, 2);
        assert_eq!(groq.timeouts, 1);
        assert_eq!(groq.avg_latency(), Duration::from_millis(200));
        assert_eq!(m.stats(ProviderKind::Local), ProviderCallStats::default());
        assert_eq!(m.total_attempts(), 3);
    }
}

//! Compaction attempts per level, trimmed chunks, guard contention.

use minutes_core::errors::CompactionLevel;
use serde::{Deserialize, Serialize};

/// How one compaction attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    /// The summary was applied to the session.
    Applied,
    /// Providers failed; nothing changed.
    Failed,
    /// A result arrived after cancellation or a session change.
    Discarded,
}

/// Counters for one compaction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounters {
    pub attempts: u64,
    pub applied: u64,
    pub failed: u64,
    pub discarded: u64,
}

impl LevelCounters {
    fn record(&mut self, outcome: AttemptOutcome) {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::Applied => self.applied += 1,
            AttemptOutcome::Failed => self.failed += 1,
            AttemptOutcome::Discarded => self.discarded += 1,
        }
    }

    /// Applied attempts as a fraction (0.0–1.0).
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.applied as f64 / self.attempts as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompactionMetrics {
    pub micro: LevelCounters,
    pub section: LevelCounters,
    /// Raw chunks dropped by post-append trims.
    pub chunks_trimmed: u64,
    /// Triggers that found another compaction in flight.
    pub guard_contention: u64,
}

impl CompactionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self, level: CompactionLevel, outcome: AttemptOutcome) {
        match level {
            CompactionLevel::Micro => self.micro.record(outcome),
            CompactionLevel::Section => self.section.record(outcome),
        }
    }

    pub fn record_trim(&mut self, dropped: usize) {
        self.chunks_trimmed += dropped as u64;
    }

    pub fn record_contention(&mut self) {
        self.guard_contention += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_level() {
        let mut m = CompactionMetrics::new();
        m.record_attempt(CompactionLevel::Micro, AttemptOutcome::Applied);
        m.record_attempt(CompactionLevel::Micro, AttemptOutcome::Failed);
        m.record_attempt(CompactionLevel::Section, AttemptOutcome::Discarded);
        m.record_trim(3);
        assert_eq!(m.micro.attempts, 2);
        assert!((m.micro.success_rate() - 0.5).abs() < f64::EPSILON);
        assert_eq!(m.section.discarded, 1);
        assert_eq!(m.chunks_trimmed, 3);
    }
}

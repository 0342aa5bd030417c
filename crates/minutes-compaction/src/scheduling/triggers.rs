//! Compaction triggers: retained chunk count and time since the last micro
//! summary, micro-summary count and time since the last section summary.

use minutes_context::CompactionView;
use minutes_core::config::CompactionConfig;

/// Why a compaction level is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    Micro,
    Section,
}

/// Input signals for trigger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSignals {
    pub now: i64,
    pub session_start: i64,
    pub recent_chunks: usize,
    pub micro_summaries: usize,
    pub last_micro_end: Option<i64>,
    pub last_section_at: Option<i64>,
}

impl TriggerSignals {
    pub fn from_view(view: &CompactionView, now: i64) -> Self {
        Self {
            now,
            session_start: view.start_time,
            recent_chunks: view.recent_len,
            micro_summaries: view.micro_len,
            last_micro_end: view.last_micro_end,
            last_section_at: view.last_section_compaction_at,
        }
    }
}

/// Enough retained chunks and enough time since the last micro-summary
/// (or the session start).
pub fn micro_due(signals: &TriggerSignals, config: &CompactionConfig) -> bool {
    let since = signals.last_micro_end.unwrap_or(signals.session_start);
    signals.recent_chunks >= config.micro_min_chunks
        && signals.now - since >= config.micro_interval_ms()
}

/// A full batch of micro-summaries and enough time since the last section
/// compaction (or the session start).
pub fn section_due(signals: &TriggerSignals, config: &CompactionConfig) -> bool {
    let since = signals.last_section_at.unwrap_or(signals.session_start);
    config.section_batch_size > 0
        && signals.micro_summaries >= config.section_batch_size
        && signals.now - since >= config.section_interval_ms()
}

/// Evaluate which levels are due. Empty means nothing to do.
pub fn evaluate_triggers(signals: &TriggerSignals, config: &CompactionConfig) -> Vec<TriggerReason> {
    let mut reasons = Vec::new();
    if micro_due(signals, config) {
        reasons.push(TriggerReason::Micro);
    }
    if section_due(signals, config) {
        reasons.push(TriggerReason::Section);
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60_000;

    fn signals(recent: usize, micros: usize, now: i64) -> TriggerSignals {
        TriggerSignals {
            now,
            session_start: 0,
            recent_chunks: recent,
            micro_summaries: micros,
            last_micro_end: None,
            last_section_at: None,
        }
    }

    #[test]
    fn micro_needs_five_chunks_and_five_minutes() {
        let config = CompactionConfig::default();
        assert!(!micro_due(&signals(4, 0, 10 * MIN), &config));
        assert!(!micro_due(&signals(5, 0, 5 * MIN - 1), &config));
        assert!(micro_due(&signals(5, 0, 5 * MIN), &config));
    }

    #[test]
    fn micro_interval_counts_from_last_micro() {
        let config = CompactionConfig::default();
        let mut s = signals(20, 1, 12 * MIN);
        s.last_micro_end = Some(8 * MIN);
        assert!(!micro_due(&s, &config));
        s.now = 13 * MIN;
        assert!(micro_due(&s, &config));
    }

    #[test]
    fn section_uses_last_section_timestamp() {
        let config = CompactionConfig::default();
        let mut s = signals(0, 3, 31 * MIN);
        assert!(section_due(&s, &config));
        s.last_section_at = Some(20 * MIN);
        assert!(!section_due(&s, &config));
        s.now = 50 * MIN;
        assert!(section_due(&s, &config));
        s.micro_summaries = 2;
        assert!(!section_due(&s, &config));
    }

    #[test]
    fn both_levels_can_be_due() {
        let reasons = evaluate_triggers(&signals(6, 3, 40 * MIN), &CompactionConfig::default());
        assert_eq!(reasons, vec![TriggerReason::Micro, TriggerReason::Section]);
    }
}

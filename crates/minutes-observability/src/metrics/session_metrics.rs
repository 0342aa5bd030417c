//! Session lifecycle, ingestion volume, questions, and minutes output.

use serde::{Deserialize, Serialize};

/// Session-level metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub sessions_started: u64,
    pub sessions_ended: u64,
    pub sessions_cancelled: u64,
    pub chunks_ingested: u64,
    pub subject_mentions: u64,
    pub questions_answered: u64,
    pub questions_failed: u64,
    pub minutes_generated: u64,
    pub sink_failures: u64,
    /// Completed session durations in minutes.
    durations_minutes: Vec<i64>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_started(&mut self) {
        self.sessions_started += 1;
    }

    pub fn session_ended(&mut self, duration_minutes: i64) {
        self.sessions_ended += 1;
        self.durations_minutes.push(duration_minutes);
        if self.durations_minutes.len() > 10_000 {
            self.durations_minutes
                .drain(..self.durations_minutes.len() - 10_000);
        }
    }

    pub fn session_cancelled(&mut self) {
        self.sessions_cancelled += 1;
    }

    pub fn chunk_ingested(&mut self, mentioned: bool) {
        self.chunks_ingested += 1;
        if mentioned {
            self.subject_mentions += 1;
        }
    }

    pub fn question(&mut self, answered: bool) {
        if answered {
            self.questions_answered += 1;
        } else {
            self.questions_failed += 1;
        }
    }

    pub fn minutes(&mut self, persisted: bool) {
        self.minutes_generated += 1;
        if !persisted {
            self.sink_failures += 1;
        }
    }

    /// Average completed session duration in minutes.
    pub fn avg_duration_minutes(&self) -> f64 {
        if self.durations_minutes.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.durations_minutes.iter().sum();
        sum as f64 / self.durations_minutes.len() as f64
    }
}

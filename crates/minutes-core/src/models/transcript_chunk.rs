use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// One decoded unit of transcribed speech. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    pub text: String,
    /// Human-readable wall-clock time (`HH:MM:SS`).
    pub timestamp: String,
    /// Epoch milliseconds.
    pub timestamp_ms: i64,
    pub speaker: Option<String>,
}

impl TranscriptChunk {
    /// Create a chunk stamped at `timestamp_ms`.
    pub fn new(text: impl Into<String>, timestamp_ms: i64, speaker: Option<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: format_clock_time(timestamp_ms),
            timestamp_ms,
            speaker,
        }
    }

    /// Render as a single prompt line: `[HH:MM:SS] Speaker: text`.
    pub fn prompt_line(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("[{}] {}: {}", self.timestamp, speaker, self.text),
            None => format!("[{}] {}", self.timestamp, self.text),
        }
    }
}

fn format_clock_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

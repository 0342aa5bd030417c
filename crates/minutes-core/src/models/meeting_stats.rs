use serde::{Deserialize, Serialize};

/// Point-in-time counters for the UI collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingStats {
    pub active: bool,
    pub session_id: Option<String>,
    pub duration_minutes: i64,
    /// Chunks currently retained.
    pub chunk_count: usize,
    /// Chunks ever appended, including trimmed ones.
    pub transcript_count: usize,
    pub micro_summary_count: usize,
    pub section_summary_count: usize,
    pub decision_count: usize,
    pub action_item_count: usize,
    pub current_topic: Option<String>,
    pub subject_mentions: usize,
}

//! MeetingContext: everything known about the active session.

use serde::{Deserialize, Serialize};

use minutes_core::keywords;
use minutes_core::models::{ActionItem, Decision, MeetingStats, MicroSummary, TranscriptChunk};

/// Per-session state: bounded raw transcript, the compaction hierarchy, and
/// tracked decisions / action items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingContext {
    pub session_id: String,
    /// Session start (epoch ms).
    pub start_time: i64,
    /// Name watched for in mention detection.
    pub subject_name: String,
    /// Most-recent-last. Bounded by the store's post-append trim.
    pub recent_chunks: Vec<TranscriptChunk>,
    pub micro_summaries: Vec<MicroSummary>,
    /// Append-only.
    pub section_summaries: Vec<String>,
    pub decisions: Vec<Decision>,
    pub action_items: Vec<ActionItem>,
    pub current_topic: Option<String>,
    /// When the last section compaction succeeded (epoch ms).
    pub last_section_compaction_at: Option<i64>,
    /// Chunks ever appended, including trimmed ones.
    pub transcript_count: usize,
    /// Chunks that mentioned `subject_name`.
    pub subject_mentions: usize,
    duration_minutes: i64,
}

/// The fields compaction trigger evaluation needs, copied out of the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionView {
    pub start_time: i64,
    pub recent_len: usize,
    pub micro_len: usize,
    pub last_micro_end: Option<i64>,
    pub last_section_compaction_at: Option<i64>,
}

impl MeetingContext {
    /// Create a context with a fresh session id.
    pub fn new(subject_name: impl Into<String>, start_time: i64) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), subject_name, start_time)
    }

    pub fn with_id(
        session_id: impl Into<String>,
        subject_name: impl Into<String>,
        start_time: i64,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            start_time,
            subject_name: subject_name.into(),
            recent_chunks: Vec::new(),
            micro_summaries: Vec::new(),
            section_summaries: Vec::new(),
            decisions: Vec::new(),
            action_items: Vec::new(),
            current_topic: None,
            last_section_compaction_at: None,
            transcript_count: 0,
            subject_mentions: 0,
            duration_minutes: 0,
        }
    }

    /// Whole minutes since `start_time`, as of the last refresh.
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Recompute the derived duration. Idempotent for a given `now`.
    pub fn refresh_duration(&mut self, now: i64) {
        self.duration_minutes = ((now - self.start_time).max(0)) / 60_000;
    }

    /// Append a chunk. Returns whether it mentions the subject.
    pub fn append_chunk(&mut self, chunk: TranscriptChunk, now: i64) -> bool {
        let mentioned = keywords::mentions(&chunk.text, &self.subject_name);
        if mentioned {
            self.subject_mentions += 1;
        }
        self.recent_chunks.push(chunk);
        self.transcript_count += 1;
        self.refresh_duration(now);
        mentioned
    }

    /// Drop the oldest chunks beyond `max_recent`. Returns how many were dropped.
    pub fn trim_recent(&mut self, max_recent: usize) -> usize {
        let excess = self.recent_chunks.len().saturating_sub(max_recent);
        if excess > 0 {
            self.recent_chunks.drain(..excess);
        }
        excess
    }

    /// Track a decision unless one with the same normalized text exists.
    pub fn track_decision(&mut self, decision: Decision) -> bool {
        if self.decisions.contains(&decision) {
            return false;
        }
        self.decisions.push(decision);
        true
    }

    /// Track an action item unless one with the same normalized text exists.
    pub fn track_action_item(&mut self, item: ActionItem) -> bool {
        if self.action_items.contains(&item) {
            return false;
        }
        self.action_items.push(item);
        true
    }

    /// Append a micro-summary; its first topic becomes the current topic.
    pub fn push_micro_summary(&mut self, summary: MicroSummary) {
        if let Some(topic) = summary.topics.first() {
            self.current_topic = Some(topic.clone());
        }
        self.micro_summaries.push(summary);
    }

    /// Replace the `count` oldest micro-summaries with one section summary.
    pub fn fold_section(&mut self, count: usize, section: String, at: i64) {
        let count = count.min(self.micro_summaries.len());
        self.micro_summaries.drain(..count);
        self.section_summaries.push(section);
        self.last_section_compaction_at = Some(at);
    }

    pub fn compaction_view(&self) -> CompactionView {
        CompactionView {
            start_time: self.start_time,
            recent_len: self.recent_chunks.len(),
            micro_len: self.micro_summaries.len(),
            last_micro_end: self.micro_summaries.last().map(|m| m.end_time),
            last_section_compaction_at: self.last_section_compaction_at,
        }
    }

    pub fn stats(&self) -> MeetingStats {
        MeetingStats {
            active: true,
            session_id: Some(self.session_id.clone()),
            duration_minutes: self.duration_minutes,
            chunk_count: self.recent_chunks.len(),
            transcript_count: self.transcript_count,
            micro_summary_count: self.micro_summaries.len(),
            section_summary_count: self.section_summaries.len(),
            decision_count: self.decisions.len(),
            action_item_count: self.action_items.len(),
            current_topic: self.current_topic.clone(),
            subject_mentions: self.subject_mentions,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::ProviderKind;

/// Where the final summary text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummarySource {
    /// Synthesized locally from the opening chunks of a short session.
    ShortSession,
    /// Generated by a provider.
    Provider { provider: ProviderKind },
    /// Local template used after every provider failed.
    Template,
}

/// The final record of a session. The only object that outlives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinutesRecord {
    pub session_id: String,
    pub subject_name: String,
    pub started_at: i64,
    pub ended_at: i64,
    pub duration_minutes: i64,
    pub summary: String,
    pub summary_source: SummarySource,
    pub decisions: Vec<String>,
    pub action_items: Vec<String>,
    pub transcript_count: usize,
    pub section_count: usize,
}

use serde::{Deserialize, Serialize};

/// Compression of a contiguous window of chunks into 2–3 sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroSummary {
    pub summary: String,
    /// Timestamp of the first chunk covered (epoch ms).
    pub start_time: i64,
    /// When the compaction was triggered (epoch ms).
    pub end_time: i64,
    pub topics: Vec<String>,
}

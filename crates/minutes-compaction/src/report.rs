//! What one post-append compaction pass did.

use minutes_core::errors::{CompactionError, CompactionLevel};
use minutes_core::models::ProviderKind;
use minutes_observability::AttemptOutcome;

/// Result of one attempted compaction level.
#[derive(Debug, Clone)]
pub enum LevelOutcome {
    /// The summary was applied.
    Applied { provider: ProviderKind, covered: usize },
    /// Providers could not produce a summary; nothing changed.
    Failed(CompactionError),
    /// Cancelled, or the session or source changed before apply.
    Discarded { reason: String },
}

impl LevelOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn attempt_outcome(&self) -> AttemptOutcome {
        match self {
            Self::Applied { .. } => AttemptOutcome::Applied,
            Self::Failed(_) => AttemptOutcome::Failed,
            Self::Discarded { .. } => AttemptOutcome::Discarded,
        }
    }
}

/// Summary of one `on_chunk_appended` pass.
#[derive(Debug, Clone, Default)]
pub struct CompactionReport {
    /// `None` when micro compaction was not due.
    pub micro: Option<LevelOutcome>,
    /// `None` when section compaction was not due.
    pub section: Option<LevelOutcome>,
    /// Another compaction held the guard; only the trim ran.
    pub contended: bool,
    /// Chunks dropped by the post-append trim.
    pub trimmed: usize,
}

impl CompactionReport {
    /// Attempted levels and their outcomes.
    pub fn attempts(&self) -> impl Iterator<Item = (CompactionLevel, &LevelOutcome)> {
        [
            (CompactionLevel::Micro, self.micro.as_ref()),
            (CompactionLevel::Section, self.section.as_ref()),
        ]
        .into_iter()
        .filter_map(|(level, outcome)| outcome.map(|o| (level, o)))
    }
}

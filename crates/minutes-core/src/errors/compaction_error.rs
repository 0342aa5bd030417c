use std::fmt;

use serde::{Deserialize, Serialize};

/// Which level of the compaction hierarchy an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactionLevel {
    Micro,
    Section,
}

impl fmt::Display for CompactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micro => f.write_str("micro"),
            Self::Section => f.write_str("section"),
        }
    }
}

/// Compaction errors. None of these are fatal to a session.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompactionError {
    /// One attempt failed; eligibility is re-evaluated on the next chunk.
    #[error("{level} compaction skipped: {reason}")]
    Skipped {
        level: CompactionLevel,
        reason: String,
    },

    /// The source material changed between snapshot and apply.
    #[error("{level} compaction source changed before apply")]
    StaleSnapshot { level: CompactionLevel },
}

use super::{CompactionError, ExtractionError, ProviderError};

/// Root error type for the minutes system.
#[derive(Debug, thiserror::Error)]
pub enum MinutesError {
    #[error("no active session")]
    NoActiveSession,

    #[error("session {session_id} is no longer active")]
    SessionChanged { session_id: String },

    #[error("provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("compaction error: {0}")]
    CompactionError(#[from] CompactionError),

    #[error("extraction error: {0}")]
    ExtractionError(#[from] ExtractionError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("persistence failed: {reason}")]
    PersistenceFailed { reason: String },
}

/// Convenience alias used across all crates.
pub type MinutesResult<T> = Result<T, MinutesError>;

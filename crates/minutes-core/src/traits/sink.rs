use async_trait::async_trait;

use crate::errors::MinutesResult;
use crate::models::{MinutesRecord, TranscriptChunk};

/// External persistence collaborator for finished sessions.
#[async_trait]
pub trait MinutesSink: Send + Sync {
    /// Store the final record and the retained raw chunks.
    async fn persist(&self, record: &MinutesRecord, chunks: &[TranscriptChunk])
        -> MinutesResult<()>;
}

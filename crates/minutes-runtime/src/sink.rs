//! Default sink when no persistence collaborator is wired in.

use async_trait::async_trait;
use tracing::info;

use minutes_core::errors::{MinutesError, MinutesResult};
use minutes_core::models::{MinutesRecord, TranscriptChunk};
use minutes_core::traits::MinutesSink;
use minutes_generator::format::render_markdown;

/// Emits the finished record as a structured `tracing` event, carrying both
/// the JSON record and its Markdown rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

/// JSON body and Markdown rendering of a record.
fn rendered(record: &MinutesRecord) -> MinutesResult<(String, String)> {
    let body = serde_json::to_string(record).map_err(MinutesError::SerializationError)?;
    Ok((body, render_markdown(record)))
}

#[async_trait]
impl MinutesSink for TracingSink {
    async fn persist(&self, record: &MinutesRecord, chunks: &[TranscriptChunk]) -> MinutesResult<()> {
        let (body, markdown) = rendered(record)?;
        info!(
            event = "minutes_record",
            session_id = %record.session_id,
            retained_chunks = chunks.len(),
            record = %body,
            markdown = %markdown,
            "minutes ready"
        );
        Ok(())
    }
}

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use minutes_core::errors::{MinutesError, MinutesResult};
use minutes_core::models::{MinutesRecord, TranscriptChunk};
use minutes_core::traits::MinutesSink;

/// Collects persisted records in memory.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(MinutesRecord, Vec<TranscriptChunk>)>>,
    fail: bool,
    stall: Option<Duration>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every record.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// A sink that sleeps for `delay` before storing the record.
    pub fn stalled(delay: Duration) -> Self {
        Self {
            stall: Some(delay),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<MinutesRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.clone())
            .collect()
    }

    /// Chunks persisted alongside the `index`-th record.
    pub fn chunks(&self, index: usize) -> Vec<TranscriptChunk> {
        self.records
            .lock()
            .unwrap()
            .get(index)
            .map(|(_, c)| c.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MinutesSink for MemorySink {
    async fn persist(&self, record: &MinutesRecord, chunks: &[TranscriptChunk]) -> MinutesResult<()> {
        if let Some(delay) = self.stall {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(MinutesError::PersistenceFailed {
                reason: "memory sink configured to fail".to_string(),
            });
        }
        self.records
            .lock()
            .unwrap()
            .push((record.clone(), chunks.to_vec()));
        Ok(())
    }
}

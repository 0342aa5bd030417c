use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use minutes_core::models::TranscriptChunk;

/// One scripted utterance, relative to the session start.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptLine {
    pub offset_secs: i64,
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
}

/// A scripted session loaded from `fixtures/transcripts/*.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptFixture {
    pub subject: String,
    pub lines: Vec<TranscriptLine>,
}

impl TranscriptFixture {
    /// Materialize the lines as chunks for a session starting at `start_ms`.
    pub fn chunks(&self, start_ms: i64) -> Vec<TranscriptChunk> {
        self.lines
            .iter()
            .map(|l| TranscriptChunk::new(&l.text, start_ms + l.offset_secs * 1_000, l.speaker.clone()))
            .collect()
    }
}

/// Absolute path of a file under this crate's `fixtures/` directory.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `fixtures/transcripts/<name>.json`.
pub fn load_transcript(name: &str) -> TranscriptFixture {
    load_fixture(&format!("transcripts/{name}.json"))
}

/// Chunks with the given texts, `step_ms` apart starting at `start_ms`.
pub fn chunks(texts: &[&str], start_ms: i64, step_ms: i64) -> Vec<TranscriptChunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| TranscriptChunk::new(*text, start_ms + i as i64 * step_ms, None))
        .collect()
}

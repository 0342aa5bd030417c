//! Keyword heuristics over transcript chunks.

use minutes_core::keywords;
use minutes_core::models::{ActionItem, Decision, TranscriptChunk};

/// A decision if the chunk contains a decision keyword.
pub fn decision_from_chunk(chunk: &TranscriptChunk) -> Option<Decision> {
    let text = chunk.text.trim();
    if text.is_empty() || !keywords::is_decision(text) {
        return None;
    }
    let topic = keywords::extract_topics(text).into_iter().next();
    Some(Decision::new(text, topic, chunk.timestamp_ms))
}

/// An action item if the chunk contains an action keyword.
///
/// The assignee comes from "assigned to X" / "X will" / "X should",
/// falling back to `default_assignee`.
pub fn action_from_chunk(chunk: &TranscriptChunk, default_assignee: &str) -> Option<ActionItem> {
    let text = chunk.text.trim();
    if text.is_empty() || !keywords::is_action(text) {
        return None;
    }
    let assignee = keywords::extract_assignee(text).or_else(|| {
        let fallback = default_assignee.trim();
        (!fallback.is_empty()).then(|| fallback.to_string())
    });
    let item = ActionItem::new(text, assignee, chunk.timestamp_ms);
    Some(match keywords::extract_deadline(text) {
        Some(deadline) => item.with_deadline(deadline),
        None => item,
    })
}

/// Scan every chunk for decisions and action items.
pub fn scan_chunks(chunks: &[TranscriptChunk], default_assignee: &str) -> (Vec<Decision>, Vec<ActionItem>) {
    let decisions = chunks.iter().filter_map(decision_from_chunk).collect();
    let actions = chunks
        .iter()
        .filter_map(|c| action_from_chunk(c, default_assignee))
        .collect();
    (decisions, actions)
}

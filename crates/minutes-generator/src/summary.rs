//! Summary strategies: short-session synthesis, provider summary, template fallback.

use minutes_core::models::TranscriptChunk;

/// Synthesize a summary from the opening chunks without a provider.
pub fn short_session_summary(subject: &str, chunks: &[TranscriptChunk], intro_chunks: usize) -> String {
    let opening: Vec<&str> = chunks
        .iter()
        .take(intro_chunks)
        .map(|c| c.text.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if opening.is_empty() {
        return format!("Brief session with {subject}. Nothing was transcribed.");
    }
    format!(
        "Brief session with {subject} ({} transcript segments). Opening remarks: {}",
        chunks.len(),
        opening.join(" ")
    )
}

/// Local summary used after every provider failed.
pub fn template_summary(
    duration_minutes: i64,
    transcript_count: usize,
    chunks: &[TranscriptChunk],
    sample_chars: usize,
) -> String {
    let joined = chunks
        .iter()
        .map(|c| c.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let sample = truncate_chars(&joined, sample_chars);
    let mut summary = format!(
        "Session lasted {duration_minutes} minutes with {transcript_count} transcript segments."
    );
    if !sample.is_empty() {
        summary.push_str(" Discussion sample: ");
        summary.push_str(sample);
        if sample.len() < joined.len() {
            summary.push_str("...");
        }
    }
    summary
}

/// The first `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

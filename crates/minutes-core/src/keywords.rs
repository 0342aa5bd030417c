//! Keyword heuristics shared by compaction (topic labels) and minutes
//! generation (decision / action detection). Plain keyword matching, no NLP.

use regex::Regex;
use std::sync::LazyLock;

/// Vocabulary scanned for micro-summary topic labels.
pub const TOPIC_VOCABULARY: [&str; 9] = [
    "deadline", "decision", "task", "project", "feature", "issue", "bug", "release", "meeting",
];

static DECISION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(decided|agreed|confirmed|approved|resolved|going with)\b").ok()
});

static ACTION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(will|should|assign(?:ed)?|deadline|need to|action item|follow up|to-?do)\b")
        .ok()
});

static ASSIGNED_TO_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bassigned to ([A-Za-z][A-Za-z'-]*)").ok());

static NAME_WILL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z'-]+) (?:will|should)\b").ok());

static DEADLINE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:by|before|due)\s+((?:next\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|week|month)|tomorrow|tonight|end of (?:the )?(?:day|week|month)|eod|eow)\b",
    )
    .ok()
});

/// Capitalized words that precede "will"/"should" without naming anyone.
const NON_NAMES: [&str; 16] = [
    "I", "We", "You", "They", "He", "She", "It", "This", "That", "There", "Someone", "Everyone",
    "Somebody", "Nobody", "What", "Who",
];

/// Case-insensitive scan of `text` against [`TOPIC_VOCABULARY`].
///
/// Returns distinct matches ordered by their first occurrence in the text.
pub fn extract_topics(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut found: Vec<(usize, &str)> = TOPIC_VOCABULARY
        .iter()
        .filter_map(|word| lowered.find(word).map(|pos| (pos, *word)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, w)| w.to_string()).collect()
}

/// Whether the text reads like a decision.
pub fn is_decision(text: &str) -> bool {
    matches(&DECISION_RE, text)
}

/// Whether the text reads like an action item.
pub fn is_action(text: &str) -> bool {
    matches(&ACTION_RE, text)
}

/// Pull an assignee from "assigned to X", "X will", or "X should".
pub fn extract_assignee(text: &str) -> Option<String> {
    if let Some(name) = capture(&ASSIGNED_TO_RE, text) {
        return Some(capitalize(&name));
    }
    let re = NAME_WILL_RE.as_ref()?;
    re.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .find(|name| !NON_NAMES.contains(name))
        .map(str::to_string)
}

/// Pull a relative deadline such as "by Friday" or "end of week".
pub fn extract_deadline(text: &str) -> Option<String> {
    capture(&DEADLINE_RE, text).map(|d| d.to_lowercase())
}

/// Whether `name` appears in `text` as a whole word, ignoring case.
pub fn mentions(text: &str, name: &str) -> bool {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    lowered.match_indices(&name).any(|(start, m)| {
        let before_ok = lowered[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = lowered[start + m.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Normalization used for deduplicating decisions and action items.
pub fn normalize_text(text: &str) -> String {
    let collapsed = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string()
}

fn matches(re: &LazyLock<Option<Regex>>, text: &str) -> bool {
    re.as_ref().is_some_and(|r| r.is_match(text))
}

fn capture(re: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    re.as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

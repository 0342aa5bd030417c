//! Decision and action item extraction.
//!
//! Three sources, merged in precedence order: items tracked during the
//! session, items a provider returned as JSON, and keyword heuristics over
//! the retained transcript.

pub mod heuristic;
pub mod structured;

pub use heuristic::{action_from_chunk, decision_from_chunk, scan_chunks};
pub use structured::{extract_json_array, parse_action_items, parse_decisions};

use minutes_core::models::{ActionItem, Decision};

/// Union of `sources` in order, keeping the first of each normalized text.
pub fn merge_decisions<I>(sources: I) -> Vec<Decision>
where
    I: IntoIterator<Item = Vec<Decision>>,
{
    let mut merged: Vec<Decision> = Vec::new();
    for decision in sources.into_iter().flatten() {
        if !merged.contains(&decision) {
            merged.push(decision);
        }
    }
    merged
}

/// Union of `sources` in order, keeping the first of each normalized text.
pub fn merge_action_items<I>(sources: I) -> Vec<ActionItem>
where
    I: IntoIterator<Item = Vec<ActionItem>>,
{
    let mut merged: Vec<ActionItem> = Vec::new();
    for item in sources.into_iter().flatten() {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}

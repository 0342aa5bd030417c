//! Parse provider JSON output for decisions and action items.
//!
//! Providers wrap JSON in prose or code fences, so the span from the first
//! `[` to the last `]` is parsed.

use serde::Deserialize;

use minutes_core::errors::ExtractionError;
use minutes_core::models::{ActionItem, Decision};

#[derive(Debug, Deserialize)]
struct DecisionDto {
    description: String,
    #[serde(default)]
    topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionItemDto {
    task: String,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
}

/// The first `[` … last `]` span of `text`.
pub fn extract_json_array<'a>(text: &'a str, kind: &str) -> Result<&'a str, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyOutput {
            kind: kind.to_string(),
        });
    }
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(ExtractionError::MalformedOutput {
            kind: kind.to_string(),
            reason: "no JSON array found".to_string(),
        }),
    }
}

pub fn parse_decisions(text: &str, timestamp: i64) -> Result<Vec<Decision>, ExtractionError> {
    let dtos: Vec<DecisionDto> = parse_array(text, "decision")?;
    Ok(dtos
        .into_iter()
        .filter(|d| !d.description.trim().is_empty())
        .map(|d| Decision::new(d.description.trim(), non_blank(d.topic), timestamp))
        .collect())
}

pub fn parse_action_items(text: &str, timestamp: i64) -> Result<Vec<ActionItem>, ExtractionError> {
    let dtos: Vec<ActionItemDto> = parse_array(text, "action item")?;
    Ok(dtos
        .into_iter()
        .filter(|a| !a.task.trim().is_empty())
        .map(|a| {
            let item = ActionItem::new(a.task.trim(), non_blank(a.assignee), timestamp);
            match non_blank(a.deadline) {
                Some(deadline) => item.with_deadline(deadline),
                None => item,
            }
        })
        .collect())
}

fn parse_array<T: for<'de> Deserialize<'de>>(text: &str, kind: &str) -> Result<Vec<T>, ExtractionError> {
    let span = extract_json_array(text, kind)?;
    serde_json::from_str(span).map_err(|e| ExtractionError::MalformedOutput {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "null")
}

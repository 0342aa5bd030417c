//! Condensed context rendering.
//!
//! The condensed context is the only session text ever handed to a provider
//! for question answering. It reads nothing but the context itself, so two
//! renders of an unchanged context are byte-identical.

use std::fmt::Write;

use minutes_core::config::SessionConfig;
use minutes_core::constants::{CONDENSED_MICRO_SUMMARIES, CONDENSED_RECENT_CHUNKS};

use crate::context::MeetingContext;

/// How much of each level the condensed context includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CondensedLimits {
    /// Trailing raw chunks.
    pub recent_chunks: usize,
    /// Trailing micro-summaries.
    pub micro_summaries: usize,
}

impl Default for CondensedLimits {
    fn default() -> Self {
        Self {
            recent_chunks: CONDENSED_RECENT_CHUNKS,
            micro_summaries: CONDENSED_MICRO_SUMMARIES,
        }
    }
}

impl From<&SessionConfig> for CondensedLimits {
    fn from(config: &SessionConfig) -> Self {
        Self {
            recent_chunks: config.condensed_recent_chunks,
            micro_summaries: config.condensed_micro_summaries,
        }
    }
}

/// Render `ctx` into the sectioned text used as question-answering context.
///
/// Order: header, the trailing raw chunks, the trailing micro-summaries,
/// every section summary, then all decisions and action items. Empty
/// sections are omitted.
pub fn condensed_context(ctx: &MeetingContext, limits: CondensedLimits) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Session with {}", ctx.subject_name);
    let _ = writeln!(out, "Duration: {} minutes", ctx.duration_minutes());
    if let Some(topic) = &ctx.current_topic {
        let _ = writeln!(out, "Current topic: {topic}");
    }

    let chunks = tail(&ctx.recent_chunks, limits.recent_chunks);
    if !chunks.is_empty() {
        out.push_str("\nRecent transcript:\n");
        for chunk in chunks {
            let _ = writeln!(out, "{}", chunk.prompt_line());
        }
    }

    let micros = tail(&ctx.micro_summaries, limits.micro_summaries);
    if !micros.is_empty() {
        out.push_str("\nRecent summaries:\n");
        for micro in micros {
            let _ = writeln!(out, "- {}", micro.summary);
        }
    }

    if !ctx.section_summaries.is_empty() {
        out.push_str("\nEarlier sections:\n");
        for (i, section) in ctx.section_summaries.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, section);
        }
    }

    if !ctx.decisions.is_empty() {
        out.push_str("\nDecisions:\n");
        for decision in &ctx.decisions {
            let _ = writeln!(out, "- {decision}");
        }
    }

    if !ctx.action_items.is_empty() {
        out.push_str("\nAction items:\n");
        for item in &ctx.action_items {
            let _ = writeln!(out, "- {item}");
        }
    }

    out
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

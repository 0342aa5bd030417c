//! Instruction templates.
//!
//! Each [`SummaryType`] has exactly one system instruction. The user turn is
//! the request content, prefixed with the word limit when one is set.

use minutes_core::models::{SummaryRequest, SummaryType};

/// System instruction for question answering over the condensed context.
pub const QUESTION_SYSTEM_PROMPT: &str = "You are an assistant listening to a live meeting. \
Answer the user's question using only the meeting context provided. \
If the context does not contain the answer, say so briefly. \
Keep answers short and specific.";

const MICRO_PROMPT: &str = "Summarize the following transcript excerpt in 2-3 sentences. \
Keep names, numbers, decisions, and commitments. Do not add information that is not in the excerpt.";

const SECTION_PROMPT: &str = "Combine the following consecutive summaries into one sentence \
that captures what this part of the meeting covered.";

const FINAL_PROMPT: &str = "Write meeting minutes from the context below. \
Use these headings: Overview, Key Points, Decisions, Action Items. \
Be concise and only include what the context supports.";

const DECISION_PROMPT: &str = "List every decision made in the context below. \
Respond with only a JSON array of objects with the fields \"description\" and \"topic\" \
(topic may be null). Respond with [] if there are none.";

const ACTION_ITEM_PROMPT: &str = "List every action item in the context below. \
Respond with only a JSON array of objects with the fields \"task\", \"assignee\", and \"deadline\" \
(assignee and deadline may be null). Respond with [] if there are none.";

/// The system instruction for a summary type.
pub fn system_prompt(summary_type: SummaryType) -> &'static str {
    match summary_type {
        SummaryType::Micro => MICRO_PROMPT,
        SummaryType::Section => SECTION_PROMPT,
        SummaryType::Final => FINAL_PROMPT,
        SummaryType::Decision => DECISION_PROMPT,
        SummaryType::ActionItem => ACTION_ITEM_PROMPT,
    }
}

/// The user turn for a summary request.
pub fn user_prompt(request: &SummaryRequest) -> String {
    match request.max_words {
        Some(limit) => format!("Use at most {limit} words.\n\n{}", request.content),
        None => request.content.clone(),
    }
}

/// The user turn for a question.
pub fn question_prompt(question: &str, context: &str) -> String {
    format!("Meeting context:\n{context}\n\nQuestion: {question}")
}

/// Rough output token budget for a request.
pub fn max_tokens(request: &SummaryRequest) -> u32 {
    match (request.summary_type, request.max_words) {
        (_, Some(words)) => (words as u32).saturating_mul(2).max(64),
        (SummaryType::Final, None) => 1_024,
        (_, None) => 512,
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MICRO_MAX_WORDS, SECTION_MAX_WORDS};

/// The kind of generation requested; each maps to its own prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryType {
    Micro,
    Section,
    Final,
    Decision,
    ActionItem,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "MICRO",
            Self::Section => "SECTION",
            Self::Final => "FINAL",
            Self::Decision => "DECISION",
            Self::ActionItem => "ACTION_ITEM",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generation request handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub summary_type: SummaryType,
    pub content: String,
    pub max_words: Option<usize>,
}

impl SummaryRequest {
    pub fn new(summary_type: SummaryType, content: impl Into<String>) -> Self {
        Self {
            summary_type,
            content: content.into(),
            max_words: None,
        }
    }

    pub fn micro(content: impl Into<String>) -> Self {
        Self::new(SummaryType::Micro, content).with_max_words(MICRO_MAX_WORDS)
    }

    pub fn section(content: impl Into<String>) -> Self {
        Self::new(SummaryType::Section, content).with_max_words(SECTION_MAX_WORDS)
    }

    pub fn final_summary(content: impl Into<String>) -> Self {
        Self::new(SummaryType::Final, content)
    }

    pub fn decisions(content: impl Into<String>) -> Self {
        Self::new(SummaryType::Decision, content)
    }

    pub fn action_items(content: impl Into<String>) -> Self {
        Self::new(SummaryType::ActionItem, content)
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }
}

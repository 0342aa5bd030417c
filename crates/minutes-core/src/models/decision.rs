use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords::normalize_text;

/// A decision made during the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub description: String,
    pub topic: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Decision {
    pub fn new(description: impl Into<String>, topic: Option<String>, timestamp: i64) -> Self {
        Self {
            description: description.into(),
            topic,
            timestamp,
        }
    }

    /// Key used for deduplication.
    pub fn dedup_key(&self) -> String {
        normalize_text(&self.description)
    }
}

impl PartialEq for Decision {
    fn eq(&self, other: &Self) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

impl Eq for Decision {}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.topic {
            Some(topic) => write!(f, "{} [{}]", self.description, topic),
            None => f.write_str(&self.description),
        }
    }
}

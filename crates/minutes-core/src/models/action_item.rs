use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords::normalize_text;

/// A task somebody committed to during the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub assignee: Option<String>,
    pub deadline: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl ActionItem {
    pub fn new(task: impl Into<String>, assignee: Option<String>, timestamp: i64) -> Self {
        Self {
            task: task.into(),
            assignee,
            deadline: None,
            timestamp,
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Key used for deduplication.
    pub fn dedup_key(&self) -> String {
        normalize_text(&self.task)
    }
}

impl PartialEq for ActionItem {
    fn eq(&self, other: &Self) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

impl Eq for ActionItem {}

impl fmt::Display for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.task)?;
        match (&self.assignee, &self.deadline) {
            (Some(who), Some(due)) => write!(f, " (owner: {who}, due: {due})"),
            (Some(who), None) => write!(f, " (owner: {who})"),
            (None, Some(due)) => write!(f, " (due: {due})"),
            (None, None) => Ok(()),
        }
    }
}

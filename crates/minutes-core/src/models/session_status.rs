use serde::{Deserialize, Serialize};

/// Lifecycle of the single active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Active { session_id: String, started_at: i64 },
    /// Session end is awaiting in-flight work and generating minutes.
    Finalizing { session_id: String },
}

impl SessionStatus {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Active { session_id, .. } | Self::Finalizing { session_id } => Some(session_id),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Active { .. } => true,
            Self::Idle | Self::Finalizing { .. } => false,
        }
    }
}

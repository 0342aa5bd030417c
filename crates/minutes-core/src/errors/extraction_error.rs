/// Structured extraction errors. Always recovered locally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    #[error("malformed {kind} output: {reason}")]
    MalformedOutput { kind: String, reason: String },

    #[error("provider returned no {kind} output")]
    EmptyOutput { kind: String },
}

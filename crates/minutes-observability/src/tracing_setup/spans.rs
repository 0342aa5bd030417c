//! Span definitions per operation: ingest, compaction, provider calls, minutes.

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($session_id:expr) => {
        tracing::debug_span!("minutes.ingest", session_id = %$session_id)
    };
}

/// Create a compaction span.
#[macro_export]
macro_rules! compaction_span {
    ($level:expr, $session_id:expr) => {
        tracing::info_span!("minutes.compaction", level = %$level, session_id = %$session_id)
    };
}

/// Create a provider orchestration span.
#[macro_export]
macro_rules! provider_span {
    ($operation:expr, $provider_count:expr) => {
        tracing::info_span!(
            "minutes.provider",
            operation = %$operation,
            provider_count = $provider_count
        )
    };
}

/// Create a minutes generation span.
#[macro_export]
macro_rules! minutes_span {
    ($session_id:expr) => {
        tracing::info_span!("minutes.generate", session_id = %$session_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "minutes.ingest";
    pub const COMPACTION: &str = "minutes.compaction";
    pub const PROVIDER: &str = "minutes.provider";
    pub const MINUTES: &str = "minutes.generate";
}

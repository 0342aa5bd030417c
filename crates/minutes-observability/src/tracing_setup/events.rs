//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a session start.
pub fn session_started(session_id: &str, subject: &str) {
    tracing::info!(
        event = "session_started",
        session_id = %session_id,
        subject = %subject,
        "session started"
    );
}

/// Log a session end.
pub fn session_ended(session_id: &str, duration_minutes: i64, transcript_count: usize) {
    tracing::info!(
        event = "session_ended",
        session_id = %session_id,
        duration_minutes = duration_minutes,
        transcript_count = transcript_count,
        "session ended"
    );
}

/// Log a chunk that mentions the session subject.
pub fn subject_mentioned(session_id: &str, subject: &str, mentions: usize) {
    tracing::info!(
        event = "subject_mentioned",
        session_id = %session_id,
        subject = %subject,
        mentions = mentions,
        "subject mentioned"
    );
}

/// Log an applied compaction.
pub fn compaction_completed(level: &str, session_id: &str, covered: usize) {
    tracing::info!(
        event = "compaction_completed",
        level = %level,
        session_id = %session_id,
        covered = covered,
        "compaction completed"
    );
}

/// Log a skipped compaction attempt.
pub fn compaction_skipped(level: &str, session_id: &str, reason: &str) {
    tracing::warn!(
        event = "compaction_skipped",
        level = %level,
        session_id = %session_id,
        reason = %reason,
        "compaction skipped"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component leaving degradation.
pub fn degradation_recovered(component: &str, recovered: usize) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        recovered = recovered,
        "degradation recovered"
    );
}

/// Log generated minutes.
pub fn minutes_generated(session_id: &str, source: &str, decisions: usize, action_items: usize) {
    tracing::info!(
        event = "minutes_generated",
        session_id = %session_id,
        source = %source,
        decisions = decisions,
        action_items = action_items,
        "minutes generated"
    );
}

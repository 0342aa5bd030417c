use chrono::Utc;
use minutes_core::errors::CompactionLevel;
use minutes_core::models::DegradationEvent;
use minutes_observability::{AttemptOutcome, ObservabilityEngine};

#[test]
fn snapshot_reports_metrics_and_degradations() {
    let mut engine = ObservabilityEngine::new();
    engine
        .metrics
        .compaction
        .record_attempt(CompactionLevel::Micro, AttemptOutcome::Applied);
    engine.metrics.session.session_started();
    engine.record_degradation(DegradationEvent {
        component: "providers.summary".into(),
        failure: "openai failed".into(),
        fallback_used: "groq".into(),
        timestamp: Utc::now(),
    });

    let snapshot = engine.metrics_snapshot().unwrap();
    assert_eq!(snapshot["degradations_total"], 1);
    assert_eq!(snapshot["degradations_active"], 1);
    assert_eq!(snapshot["metrics"]["compaction"]["micro"]["applied"], 1);
    assert_eq!(snapshot["metrics"]["session"]["sessions_started"], 1);

    engine.mark_recovered("providers.summary");
    assert_eq!(engine.metrics_snapshot().unwrap()["degradations_active"], 0);
}

#[test]
fn span_macros_and_init_are_usable() {
    let _ = minutes_observability::tracing_setup::init_with_filter("debug");
    let span = minutes_observability::compaction_span!(CompactionLevel::Section, "s1");
    let _guard = span.enter();
    minutes_observability::tracing_setup::events::compaction_completed("section", "s1", 3);
    assert_eq!(
        minutes_observability::tracing_setup::spans::names::COMPACTION,
        "minutes.compaction"
    );
}

use std::sync::Arc;

use minutes_context::ContextStore;
use minutes_core::config::SessionConfig;
use minutes_core::errors::{CompactionError, MinutesError};
use minutes_core::models::{ActionItem, Decision, MicroSummary, TranscriptChunk};
use test_fixtures::{chunks, ManualClock};

fn store() -> (ContextStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_000_000));
    (ContextStore::new(SessionConfig::default(), clock.clone()), clock)
}

fn micro(text: &str) -> MicroSummary {
    MicroSummary {
        summary: text.to_string(),
        start_time: 0,
        end_time: 1,
        topics: vec![],
    }
}

#[test]
fn operations_without_session_are_neutral() {
    let (store, _) = store();
    assert!(!store.is_active());
    assert!(store.append_chunk(TranscriptChunk::new("hello", 0, None)).is_none());
    assert_eq!(store.trim_recent(), 0);
    assert_eq!(store.condensed_context(), "");
    assert!(!store.stats().active);
    assert!(store.end_session().is_none());
    assert!(!store.track_decision(Decision::new("x", None, 0)));
}

#[test]
fn start_session_replaces_existing() {
    let (store, _) = store();
    let first = store.start_session("Alice");
    let second = store.start_session("Bob");
    assert_ne!(first.session_id, second.session_id);
    assert_eq!(store.session_id(), Some(second.session_id));
    assert_eq!(store.snapshot().map(|c| c.subject_name), Some("Bob".to_string()));
}

#[test]
fn append_reports_mentions_and_updates_duration() {
    let (store, clock) = store();
    let ctx = store.start_session("Alice");
    clock.advance_minutes(4);
    let appended = store
        .append_chunk(TranscriptChunk::new("Alice has the numbers", clock.now(), None))
        .unwrap();
    assert_eq!(appended.session_id, ctx.session_id);
    assert!(appended.mentioned);
    assert_eq!(appended.retained, 1);

    let stats = store.stats();
    assert_eq!(stats.duration_minutes, 4);
    assert_eq!(stats.subject_mentions, 1);
    assert_eq!(stats.transcript_count, 1);
}

#[test]
fn trim_keeps_most_recent_twenty() {
    let (store, _) = store();
    store.start_session("A");
    let texts: Vec<String> = (0..30).map(|i| format!("c{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    for chunk in chunks(&refs, 0, 1_000) {
        store.append_chunk(chunk);
    }
    assert_eq!(store.trim_recent(), 10);
    let ctx = store.snapshot().unwrap();
    assert_eq!(ctx.recent_chunks.len(), 20);
    assert_eq!(ctx.recent_chunks[0].text, "c10");
    assert_eq!(ctx.transcript_count, 30);
}

#[test]
fn condensed_context_is_idempotent() {
    let (store, clock) = store();
    store.start_session("Alice");
    for chunk in chunks(&["we decided to ship", "Bob will test"], clock.now(), 1_000) {
        store.append_chunk(chunk);
    }
    store.track_decision(Decision::new("Ship it", None, 0));
    store.track_action_item(ActionItem::new("Test it", Some("Bob".into()), 0));
    assert_eq!(store.condensed_context(), store.condensed_context());
}

#[test]
fn refresh_duration_is_idempotent() {
    let (store, clock) = store();
    store.start_session("A");
    clock.advance_minutes(7);
    assert_eq!(store.refresh_duration(), Some(7));
    assert_eq!(store.refresh_duration(), Some(7));
}

#[test]
fn apply_micro_checks_session() {
    let (store, _) = store();
    let ctx = store.start_session("A");
    store.apply_micro_summary(&ctx.session_id, micro("m0")).unwrap();
    let err = store.apply_micro_summary("other", micro("m1")).unwrap_err();
    assert!(matches!(err, MinutesError::SessionChanged { .. }));
    assert_eq!(store.stats().micro_summary_count, 1);
}

#[test]
fn section_apply_folds_front_batch() {
    let (store, clock) = store();
    let ctx = store.start_session("A");
    for i in 0..4 {
        store.apply_micro_summary(&ctx.session_id, micro(&format!("m{i}"))).unwrap();
    }
    let snap = store.section_snapshot(3).unwrap();
    assert_eq!(snap.micros.len(), 3);
    clock.advance_minutes(31);
    store
        .apply_section_summary(&ctx.session_id, &snap.micros, "section".into())
        .unwrap();

    let after = store.snapshot().unwrap();
    assert_eq!(after.micro_summaries.len(), 1);
    assert_eq!(after.micro_summaries[0].summary, "m3");
    assert_eq!(after.section_summaries, vec!["section".to_string()]);
    assert_eq!(after.last_section_compaction_at, Some(clock.now()));
}

#[test]
fn section_apply_rejects_stale_snapshot() {
    let (store, _) = store();
    let ctx = store.start_session("A");
    for i in 0..3 {
        store.apply_micro_summary(&ctx.session_id, micro(&format!("m{i}"))).unwrap();
    }
    let stale = vec![micro("x"), micro("y"), micro("z")];
    let err = store
        .apply_section_summary(&ctx.session_id, &stale, "section".into())
        .unwrap_err();
    assert!(matches!(
        err,
        MinutesError::CompactionError(CompactionError::StaleSnapshot { .. })
    ));
    assert_eq!(store.stats().micro_summary_count, 3);
    assert_eq!(store.stats().section_summary_count, 0);
}

#[test]
fn section_snapshot_requires_full_batch() {
    let (store, _) = store();
    let ctx = store.start_session("A");
    store.apply_micro_summary(&ctx.session_id, micro("m0")).unwrap();
    assert!(store.section_snapshot(3).is_none());
}

#[test]
fn end_session_detaches() {
    let (store, clock) = store();
    store.start_session("A");
    clock.advance_minutes(3);
    let ended = store.end_session().unwrap();
    assert_eq!(ended.duration_minutes(), 3);
    assert!(!store.is_active());
}

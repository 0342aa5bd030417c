use std::sync::Arc;
use std::time::Duration;

use minutes_compaction::{CompactionScheduler, LevelOutcome};
use minutes_context::ContextStore;
use minutes_core::config::{CompactionConfig, SessionConfig};
use minutes_core::errors::CompactionError;
use minutes_core::models::{MicroSummary, ProviderKind, SummaryType, TranscriptChunk};
use minutes_providers::ProviderOrchestrator;
use test_fixtures::{ManualClock, Outcome, ScriptedProvider};
use tokio_util::sync::CancellationToken;

const START: i64 = 1_700_000_000_000;
const MIN: i64 = 60_000;

struct Harness {
    clock: Arc<ManualClock>,
    store: Arc<ContextStore>,
    provider: Arc<ScriptedProvider>,
    scheduler: Arc<CompactionScheduler>,
    session_id: String,
}

fn harness(provider: ScriptedProvider) -> Harness {
    let clock = Arc::new(ManualClock::new(START));
    let store = Arc::new(ContextStore::new(SessionConfig::default(), clock.clone()));
    let provider = Arc::new(provider);
    let orchestrator =
        Arc::new(ProviderOrchestrator::new(Duration::from_secs(30)).with_provider(provider.clone()));
    let scheduler = Arc::new(CompactionScheduler::new(
        store.clone(),
        orchestrator,
        CompactionConfig::default(),
        clock.clone(),
    ));
    let session_id = store.start_session("Alice").session_id;
    Harness {
        clock,
        store,
        provider,
        scheduler,
        session_id,
    }
}

impl Harness {
    fn append(&self, text: &str) {
        self.store
            .append_chunk(TranscriptChunk::new(text, self.clock.now(), None));
    }

    fn seed_micros(&self, n: usize) {
        for i in 0..n {
            self.store
                .apply_micro_summary(
                    &self.session_id,
                    MicroSummary {
                        summary: format!("micro {i}"),
                        start_time: START,
                        end_time: START + 1,
                        topics: vec![],
                    },
                )
                .unwrap();
        }
    }
}

#[tokio::test]
async fn no_micro_before_five_chunks() {
    let h = harness(ScriptedProvider::replying(ProviderKind::OpenAi, "summary"));
    h.clock.advance_minutes(10);
    for i in 0..4 {
        h.append(&format!("chunk {i}"));
        let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
        assert!(report.micro.is_none());
    }
    assert_eq!(h.provider.calls(), 0);
    assert_eq!(h.store.stats().micro_summary_count, 0);
}

#[tokio::test]
async fn exactly_one_micro_per_eligible_trigger() {
    let h = harness(ScriptedProvider::replying(
        ProviderKind::OpenAi,
        "The team discussed the release deadline.",
    ));
    for i in 0..4 {
        h.append(&format!("chunk {i}"));
        h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
        h.clock.advance_secs(90);
    }
    h.append("chunk 4");
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(matches!(
        report.micro,
        Some(LevelOutcome::Applied { provider: ProviderKind::OpenAi, covered: 5 })
    ));

    // Same instant, one more chunk: the interval has not elapsed again.
    h.append("chunk 5");
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(report.micro.is_none());

    let ctx = h.store.snapshot().unwrap();
    assert_eq!(ctx.micro_summaries.len(), 1);
    let micro = &ctx.micro_summaries[0];
    assert_eq!(micro.start_time, START);
    assert_eq!(micro.end_time, h.clock.now());
    assert_eq!(micro.topics, vec!["release", "deadline"]);
    assert_eq!(ctx.current_topic.as_deref(), Some("release"));

    let requests = h.provider.summary_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].summary_type, SummaryType::Micro);
    assert_eq!(requests[0].max_words, Some(100));
    assert_eq!(requests[0].content.lines().count(), 5);
}

#[tokio::test]
async fn micro_failure_is_skipped_without_changes() {
    let h = harness(ScriptedProvider::failing(ProviderKind::OpenAi));
    h.clock.advance_minutes(6);
    for i in 0..5 {
        h.append(&format!("chunk {i}"));
    }
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(matches!(
        report.micro,
        Some(LevelOutcome::Failed(CompactionError::Skipped { .. }))
    ));
    assert_eq!(h.store.stats().micro_summary_count, 0);
    assert!(!h.scheduler.is_running());
}

#[tokio::test]
async fn section_folds_three_oldest_on_success() {
    let h = harness(ScriptedProvider::replying(ProviderKind::Groq, "First half covered planning."));
    h.seed_micros(4);
    h.clock.advance_minutes(31);
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(matches!(report.section, Some(LevelOutcome::Applied { covered: 3, .. })));

    let ctx = h.store.snapshot().unwrap();
    assert_eq!(ctx.section_summaries, vec!["First half covered planning.".to_string()]);
    assert_eq!(ctx.micro_summaries.len(), 1);
    assert_eq!(ctx.micro_summaries[0].summary, "micro 3");
    assert_eq!(ctx.last_section_compaction_at, Some(h.clock.now()));

    let request = &h.provider.summary_requests()[0];
    assert_eq!(request.summary_type, SummaryType::Section);
    assert_eq!(request.content, "micro 0\nmicro 1\nmicro 2");
}

#[tokio::test]
async fn micro_completing_a_batch_runs_section_in_the_same_pass() {
    let h = harness(ScriptedProvider::replying(ProviderKind::OpenAi, "summary"));
    h.seed_micros(2);
    h.clock.advance_minutes(31);
    for i in 0..5 {
        h.append(&format!("chunk {i}"));
    }

    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;

    assert!(matches!(report.micro, Some(LevelOutcome::Applied { covered: 5, .. })));
    assert!(matches!(report.section, Some(LevelOutcome::Applied { covered: 3, .. })));
    let stats = h.store.stats();
    assert_eq!(stats.micro_summary_count, 0);
    assert_eq!(stats.section_summary_count, 1);
    let kinds: Vec<_> = h
        .provider
        .summary_requests()
        .iter()
        .map(|r| r.summary_type)
        .collect();
    assert_eq!(kinds, vec![SummaryType::Micro, SummaryType::Section]);
}

#[tokio::test]
async fn section_failure_leaves_micros_untouched() {
    let h = harness(ScriptedProvider::new(
        ProviderKind::Groq,
        Outcome::ErrorText("overloaded".into()),
    ));
    h.seed_micros(3);
    h.clock.advance_minutes(31);
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(matches!(report.section, Some(LevelOutcome::Failed(_))));

    let ctx = h.store.snapshot().unwrap();
    assert_eq!(ctx.micro_summaries.len(), 3);
    assert!(ctx.section_summaries.is_empty());
    assert!(ctx.last_section_compaction_at.is_none());
}

#[tokio::test]
async fn section_not_due_before_interval() {
    let h = harness(ScriptedProvider::replying(ProviderKind::Groq, "section"));
    h.seed_micros(3);
    h.clock.advance_minutes(29);
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(report.section.is_none());
    assert_eq!(h.provider.calls(), 0);
}

#[tokio::test]
async fn cancelled_pass_discards_result() {
    let h = harness(ScriptedProvider::replying(ProviderKind::OpenAi, "summary"));
    h.clock.advance_minutes(6);
    for i in 0..5 {
        h.append(&format!("chunk {i}"));
    }
    let token = CancellationToken::new();
    token.cancel();
    let report = h.scheduler.on_chunk_appended(&token).await;
    assert!(matches!(report.micro, Some(LevelOutcome::Discarded { .. })));
    assert_eq!(h.store.stats().micro_summary_count, 0);
}

#[tokio::test]
async fn trim_runs_after_every_pass() {
    let h = harness(ScriptedProvider::replying(ProviderKind::OpenAi, "summary"));
    for i in 0..25 {
        h.append(&format!("chunk {i}"));
    }
    let report = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(report.micro.is_none());
    assert_eq!(report.trimmed, 5);
    assert_eq!(h.store.stats().chunk_count, 20);
}

#[tokio::test(start_paused = true)]
async fn concurrent_trigger_only_trims() {
    let h = harness(ScriptedProvider::new(
        ProviderKind::OpenAi,
        Outcome::Delayed(Duration::from_secs(10), "slow summary".into()),
    ));
    h.clock.advance_minutes(6);
    for i in 0..5 {
        h.append(&format!("chunk {i}"));
    }

    let scheduler = h.scheduler.clone();
    let first = tokio::spawn(async move { scheduler.on_chunk_appended(&CancellationToken::new()).await });
    while !h.scheduler.is_running() {
        tokio::task::yield_now().await;
    }

    h.append("chunk 5");
    let second = h.scheduler.on_chunk_appended(&CancellationToken::new()).await;
    assert!(second.contended);
    assert!(second.micro.is_none());

    let first = first.await.unwrap();
    assert!(first.micro.as_ref().is_some_and(|m| m.is_applied()));
    assert_eq!(h.store.stats().micro_summary_count, 1);
    assert_eq!(h.provider.calls(), 1);
}

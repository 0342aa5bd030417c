use std::sync::Arc;
use std::time::Duration;

use minutes_core::config::MinutesConfig;
use minutes_core::models::{
    ProviderKind, ResponseFailure, SessionStatus, SummarySource, SummaryType,
};
use minutes_providers::ProviderOrchestrator;
use minutes_runtime::MeetingRuntime;
use test_fixtures::{load_transcript, ManualClock, MemorySink, Outcome, ScriptedProvider};

const START: i64 = 1_700_000_000_000;

struct Harness {
    clock: Arc<ManualClock>,
    sink: Arc<MemorySink>,
    runtime: MeetingRuntime,
}

fn config() -> MinutesConfig {
    let mut config = MinutesConfig::default();
    config.runtime.duration_refresh_secs = 0;
    config
}

fn harness_with(orchestrator: ProviderOrchestrator, sink: MemorySink, config: MinutesConfig) -> Harness {
    let clock = Arc::new(ManualClock::new(START));
    let sink = Arc::new(sink);
    let runtime = MeetingRuntime::new(config, orchestrator, clock.clone(), sink.clone());
    Harness {
        clock,
        sink,
        runtime,
    }
}

fn harness(orchestrator: ProviderOrchestrator) -> Harness {
    harness_with(orchestrator, MemorySink::new(), config())
}

fn orchestrator() -> ProviderOrchestrator {
    ProviderOrchestrator::new(Duration::from_secs(30))
}

fn summarizer(kind: ProviderKind, text: &str) -> ScriptedProvider {
    ScriptedProvider::replying(kind, text)
        .on_summary(SummaryType::Decision, Outcome::Reply("[]".into()))
        .on_summary(SummaryType::ActionItem, Outcome::Reply("[]".into()))
}

#[tokio::test]
async fn alice_decisions_produce_one_micro_summary_and_minutes() {
    let provider = Arc::new(summarizer(
        ProviderKind::OpenAi,
        "The team decided on the release and demo dates.",
    ));
    let h = harness(orchestrator().with_provider(provider.clone()));
    let transcript = load_transcript("alice_decisions");

    let started = h.runtime.start_session(&transcript.subject).await;
    assert!(started.previous.is_none());
    for line in &transcript.lines {
        h.clock.set(START + line.offset_secs * 1_000);
        h.runtime.ingest(&line.text, line.speaker.as_deref());
        h.runtime.flush().await;
    }

    let stats = h.runtime.stats();
    assert_eq!(stats.micro_summary_count, 1);
    assert!(stats.decision_count >= 1);
    assert_eq!(stats.transcript_count, 5);
    assert_eq!(stats.subject_mentions, 1);
    let micro_requests = provider
        .summary_requests()
        .iter()
        .filter(|r| r.summary_type == SummaryType::Micro)
        .count();
    assert_eq!(micro_requests, 1);

    let record = h.runtime.end_session().await.unwrap();
    assert_eq!(record.session_id, started.session_id);
    assert_eq!(record.duration_minutes, 6);
    assert_eq!(
        record.summary_source,
        SummarySource::Provider {
            provider: ProviderKind::OpenAi
        }
    );
    assert!(!record.decisions.is_empty());
    assert!(record
        .action_items
        .iter()
        .any(|a| a.contains("owner: Bob") && a.contains("due: friday")));

    assert_eq!(h.sink.len(), 1);
    assert_eq!(h.sink.chunks(0).len(), 5);
    assert_eq!(h.runtime.status(), SessionStatus::Idle);
    assert!(!h.runtime.stats().active);
}

#[tokio::test]
async fn zero_providers_short_session() {
    let h = harness(orchestrator());
    h.runtime.start_session("Dana").await;
    h.runtime.ingest("Hi everyone, quick check-in.", Some("Dana"));
    h.runtime.flush().await;

    let record = h.runtime.end_session().await.unwrap();

    assert_eq!(record.summary_source, SummarySource::ShortSession);
    assert!(record.summary.contains("Hi everyone, quick check-in."));
    assert_eq!(record.transcript_count, 1);
    assert_eq!(h.sink.records()[0].session_id, record.session_id);
}

#[tokio::test]
async fn long_session_without_providers_uses_template() {
    let h = harness(orchestrator());
    h.runtime.start_session("Erin").await;
    h.runtime.ingest("We reviewed the roadmap.", None);
    h.clock.advance_minutes(15);

    let record = h.runtime.end_session().await.unwrap();

    assert_eq!(record.summary_source, SummarySource::Template);
    assert!(record.summary.starts_with("Session lasted 15 minutes"));
}

#[tokio::test]
async fn sink_failure_still_returns_record() {
    let h = harness_with(orchestrator(), MemorySink::failing(), config());
    h.runtime.start_session("Dana").await;
    h.runtime.ingest("hello", None);

    let record = h.runtime.end_session().await;

    assert!(record.is_some());
    assert!(h.sink.is_empty());
    let metrics = h.runtime.metrics().unwrap();
    assert_eq!(metrics["metrics"]["session"]["sink_failures"], 1);
}

#[tokio::test]
async fn cancel_discards_session_without_minutes() {
    let h = harness(orchestrator());
    h.runtime.start_session("Alice").await;
    h.runtime.ingest("something", None);

    assert!(h.runtime.cancel_session().await);
    assert!(!h.runtime.cancel_session().await);
    assert!(h.runtime.end_session().await.is_none());
    assert!(h.sink.is_empty());
    assert!(h.runtime.ingest("late", None).is_none());
    assert_eq!(h.runtime.condensed_context(), "");
}

#[tokio::test]
async fn starting_a_session_ends_the_previous_one() {
    let h = harness(orchestrator());
    let first = h.runtime.start_session("Alice").await;
    h.runtime.ingest("first session", None);

    let second = h.runtime.start_session("Bob").await;

    let previous = second.previous.unwrap();
    assert_eq!(previous.session_id, first.session_id);
    assert_eq!(previous.subject_name, "Alice");
    assert_ne!(second.session_id, first.session_id);
    assert_eq!(h.sink.len(), 1);
    assert_eq!(h.runtime.status().session_id(), Some(second.session_id.as_str()));
}

#[tokio::test]
async fn questions_use_the_condensed_context() {
    let provider = Arc::new(ScriptedProvider::replying(ProviderKind::Groq, "Monday."));
    let h = harness(orchestrator().with_provider(provider.clone()));

    let idle = h.runtime.answer_question("when?").await;
    assert_eq!(idle.failure, Some(ResponseFailure::NoActiveSession));
    assert_eq!(provider.calls(), 0);

    h.runtime.start_session("Alice").await;
    h.runtime.ingest("Alice: we ship on Monday", Some("Alice"));
    h.runtime.flush().await;
    let answer = h.runtime.answer_question("When do we ship?").await;

    assert!(answer.success);
    assert_eq!(answer.content, "Monday.");
    let (question, context) = provider.questions().remove(0);
    assert_eq!(question, "When do we ship?");
    assert!(context.starts_with("Session with Alice\n"));
    assert!(context.contains("Alice: Alice: we ship on Monday"));
}

#[tokio::test]
async fn unconfigured_questions_are_distinguishable() {
    let h = harness(orchestrator());
    h.runtime.start_session("Alice").await;
    let answer = h.runtime.answer_question("anything?").await;
    assert_eq!(answer.failure, Some(ResponseFailure::NotConfigured));
}

#[tokio::test]
async fn blank_fragments_are_ignored() {
    let h = harness(orchestrator());
    h.runtime.start_session("Alice").await;
    assert!(h.runtime.ingest("   ", None).is_none());
    assert_eq!(h.runtime.stats().transcript_count, 0);
}

#[tokio::test(start_paused = true)]
async fn end_session_cancels_work_past_the_grace_period() {
    let provider = Arc::new(
        summarizer(ProviderKind::OpenAi, "Final summary.").on_summary(
            SummaryType::Micro,
            Outcome::Delayed(Duration::from_secs(25), "late micro".into()),
        ),
    );
    let h = harness(orchestrator().with_provider(provider));
    h.runtime.start_session("Alice").await;
    for i in 0..5 {
        h.runtime.ingest(&format!("point {i}"), None);
    }
    h.clock.advance_minutes(6);
    h.runtime.ingest("point 5", None);

    let record = h.runtime.end_session().await.unwrap();

    assert_eq!(record.summary, "Final summary.");
    assert_eq!(h.runtime.status(), SessionStatus::Idle);
    assert_eq!(h.runtime.in_flight(), 0);
    let metrics = h.runtime.metrics().unwrap();
    assert_eq!(metrics["metrics"]["compaction"]["micro"]["applied"], 0);
}

#[tokio::test]
async fn fallbacks_show_up_as_degradations() {
    let h = harness(
        orchestrator()
            .with_provider(Arc::new(ScriptedProvider::failing(ProviderKind::OpenAi)))
            .with_provider(Arc::new(ScriptedProvider::replying(ProviderKind::Groq, "ok"))),
    );
    h.runtime.start_session("Alice").await;

    let answer = h.runtime.answer_question("status?").await;

    assert_eq!(answer.provider, Some(ProviderKind::Groq));
    let degradations = h.runtime.degradations();
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].event.fallback_used, "groq");
    let metrics = h.runtime.metrics().unwrap();
    assert_eq!(metrics["degradations_total"], 1);
}

#[tokio::test]
async fn primary_recovery_clears_active_degradations() {
    let openai = Arc::new(
        ScriptedProvider::replying(ProviderKind::OpenAi, "from openai")
            .with_script([Outcome::Fail("openai is down".into())]),
    );
    let groq = Arc::new(ScriptedProvider::replying(ProviderKind::Groq, "from groq"));
    let h = harness(orchestrator().with_provider(openai).with_provider(groq));
    h.runtime.start_session("Alice").await;

    let a = h.runtime.answer_question("first?").await;
    assert_eq!(h.runtime.metrics().unwrap()["degradations_active"], 1);
    let b = h.runtime.answer_question("second?").await;
    let c = h.runtime.answer_question("third?").await;

    assert_eq!(a.provider, Some(ProviderKind::Groq));
    assert_eq!(b.provider, Some(ProviderKind::OpenAi));
    assert_eq!(c.provider, Some(ProviderKind::OpenAi));
    let metrics = h.runtime.metrics().unwrap();
    assert_eq!(metrics["degradations_total"], 1);
    assert_eq!(metrics["degradations_active"], 0);
    let degradations = h.runtime.degradations();
    assert_eq!(degradations.len(), 1);
    assert!(degradations[0].recovered_at.is_some());
    assert!(h.runtime.degradation_alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stalled_sink_counts_as_a_failure_after_the_grace_period() {
    let h = harness_with(
        orchestrator(),
        MemorySink::stalled(Duration::from_secs(3_600)),
        config(),
    );
    h.runtime.start_session("Dana").await;
    h.runtime.ingest("hello", None);

    let record = h.runtime.end_session().await;

    assert!(record.is_some());
    assert!(h.sink.is_empty());
    assert_eq!(h.runtime.status(), SessionStatus::Idle);
    let metrics = h.runtime.metrics().unwrap();
    assert_eq!(metrics["metrics"]["session"]["sink_failures"], 1);
}

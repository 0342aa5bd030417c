//! MeetingRuntime: owns the engines of one meeting assistant and the
//! background tasks of the active session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use minutes_compaction::{CompactionReport, CompactionScheduler};
use minutes_context::{ChunkAppended, CondensedLimits, ContextStore};
use minutes_core::config::{MinutesConfig, RuntimeConfig};
use minutes_core::errors::MinutesResult;
use minutes_core::models::{
    MeetingStats, MinutesRecord, ProviderResponse, SessionStatus, TranscriptChunk,
};
use minutes_core::traits::{Clock, MinutesSink, SystemClock};
use minutes_generator::extraction::{action_from_chunk, decision_from_chunk};
use minutes_generator::MinutesGenerator;
use minutes_observability::tracing_setup::{self, events};
use minutes_observability::{ingest_span, DegradationAlert, ObservabilityEngine, TrackedDegradation};
use minutes_providers::{build_orchestrator, ProviderOrchestrator, ProviderSignal};

use crate::session::{drain_with_grace, join_all, ActiveSession};
use crate::sink::TracingSink;

/// Result of [`MeetingRuntime::start_session`].
#[derive(Debug, Clone)]
pub struct SessionStarted {
    pub session_id: String,
    /// Minutes of the session this one replaced.
    pub previous: Option<MinutesRecord>,
}

/// The central runtime for live meeting sessions.
///
/// At most one session is active. Ingestion appends synchronously and
/// spawns compaction in the background; it never waits for providers.
/// Must be used from within a Tokio runtime for background work to run.
pub struct MeetingRuntime {
    store: Arc<ContextStore>,
    orchestrator: Arc<ProviderOrchestrator>,
    scheduler: Arc<CompactionScheduler>,
    generator: MinutesGenerator,
    sink: Arc<dyn MinutesSink>,
    clock: Arc<dyn Clock>,
    config: RuntimeConfig,
    observability: Arc<Mutex<ObservabilityEngine>>,
    active: Mutex<Option<ActiveSession>>,
    /// Session id while `end_session` is draining and generating.
    finalizing: Mutex<Option<String>>,
}

impl MeetingRuntime {
    pub fn new(
        config: MinutesConfig,
        orchestrator: ProviderOrchestrator,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn MinutesSink>,
    ) -> Self {
        let orchestrator = Arc::new(orchestrator);
        let limits = CondensedLimits::from(&config.session);
        let store = Arc::new(ContextStore::new(config.session, clock.clone()));
        let scheduler = Arc::new(CompactionScheduler::new(
            store.clone(),
            orchestrator.clone(),
            config.compaction,
            clock.clone(),
        ));
        let generator = MinutesGenerator::new(orchestrator.clone(), config.minutes, limits);

        Self {
            store,
            orchestrator,
            scheduler,
            generator,
            sink,
            clock,
            config: config.runtime,
            observability: Arc::new(Mutex::new(ObservabilityEngine::new())),
            active: Mutex::new(None),
            finalizing: Mutex::new(None),
        }
    }

    /// Build from configuration alone: tracing, providers from credentials
    /// and the environment, the system clock, and a [`TracingSink`].
    pub fn from_config(config: MinutesConfig) -> MinutesResult<Self> {
        tracing_setup::init(&config.observability);
        let orchestrator = build_orchestrator(&config.providers)?;
        Ok(Self::new(
            config,
            orchestrator,
            Arc::new(SystemClock),
            Arc::new(TracingSink),
        ))
    }

    pub fn store(&self) -> &Arc<ContextStore> {
        &self.store
    }

    pub fn orchestrator(&self) -> &Arc<ProviderOrchestrator> {
        &self.orchestrator
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Start a session for `subject`. An active session is ended first and
    /// its minutes are returned in [`SessionStarted::previous`].
    pub async fn start_session(&self, subject: &str) -> SessionStarted {
        let previous = self.end_session().await;

        let ctx = self.store.start_session(subject);
        let mut session = ActiveSession::new(ctx.session_id.clone(), ctx.start_time);
        if let Some(ticker) = self.spawn_ticker(&session.cancel) {
            session.set_ticker(ticker);
        }
        if let Some(stale) = lock(&self.active).replace(session) {
            // A concurrent start raced us; its work belongs to a replaced session.
            drop(stale.shut_down());
        }

        events::session_started(&ctx.session_id, subject);
        lock(&self.observability).metrics.session.session_started();
        SessionStarted {
            session_id: ctx.session_id,
            previous,
        }
    }

    /// End the active session and produce its minutes.
    ///
    /// In-flight compaction gets `end_grace_period_secs` to finish; anything
    /// still running is cancelled and its result discarded. The sink gets the
    /// same grace period; the record is returned even if the sink fails or
    /// times out. `None` with no active session.
    pub async fn end_session(&self) -> Option<MinutesRecord> {
        let session = lock(&self.active).take()?;
        let session_id = session.session_id.clone();
        *lock(&self.finalizing) = Some(session_id.clone());

        let (cancel, tasks) = session.finish();
        let grace = Duration::from_secs(self.config.end_grace_period_secs);
        drain_with_grace(tasks, grace, &cancel).await;
        cancel.cancel();

        let record = match self.store.end_session() {
            Some(ctx) => {
                let record = self.generator.generate(&ctx, self.clock.now_millis()).await;
                let persisted =
                    match tokio::time::timeout(grace, self.sink.persist(&record, &ctx.recent_chunks)).await {
                        Ok(Ok(())) => true,
                        Ok(Err(e)) => {
                            warn!(session_id = %record.session_id, error = %e, "failed to persist minutes");
                            false
                        }
                        Err(_) => {
                            warn!(
                                session_id = %record.session_id,
                                grace_ms = grace.as_millis() as u64,
                                "timed out persisting minutes"
                            );
                            false
                        }
                    };
                events::session_ended(&ctx.session_id, record.duration_minutes, ctx.transcript_count);
                let mut obs = lock(&self.observability);
                obs.metrics.session.minutes(persisted);
                obs.metrics.session.session_ended(record.duration_minutes);
                Some(record)
            }
            None => {
                warn!(session_id = %session_id, "session vanished before minutes");
                None
            }
        };

        *lock(&self.finalizing) = None;
        self.sync_observability();
        record
    }

    /// Discard the active session without minutes. In-flight compaction is
    /// cancelled. Returns whether a session was active.
    pub async fn cancel_session(&self) -> bool {
        let Some(session) = lock(&self.active).take() else {
            return false;
        };
        let session_id = session.session_id.clone();
        join_all(session.shut_down()).await;
        self.store.end_session();
        info!(session_id = %session_id, "session cancelled");
        lock(&self.observability).metrics.session.session_cancelled();
        true
    }

    // ── Ingestion ───────────────────────────────────────────────────────

    /// Append a transcript fragment to the active session.
    ///
    /// Tracks keyword-detected decisions and action items, logs subject
    /// mentions, and spawns a compaction pass. Blank text and calls without
    /// an active session are ignored.
    pub fn ingest(&self, text: &str, speaker: Option<&str>) -> Option<ChunkAppended> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank transcript fragment");
            return None;
        }
        let chunk = TranscriptChunk::new(text, self.clock.now_millis(), speaker.map(str::to_string));
        let Some(appended) = self.store.append_chunk(chunk.clone()) else {
            debug!("no active session, fragment dropped");
            return None;
        };
        let _span = ingest_span!(appended.session_id.as_str()).entered();

        if let Some(decision) = decision_from_chunk(&chunk) {
            if self.store.track_decision(decision) {
                debug!("decision tracked");
            }
        }
        if let Some(subject) = self.store.read(|ctx| ctx.subject_name.clone()) {
            if let Some(item) = action_from_chunk(&chunk, &subject) {
                if self.store.track_action_item(item) {
                    debug!("action item tracked");
                }
            }
            if appended.mentioned {
                let mentions = self.store.read(|ctx| ctx.subject_mentions).unwrap_or_default();
                events::subject_mentioned(&appended.session_id, &subject, mentions);
            }
        }
        lock(&self.observability)
            .metrics
            .session
            .chunk_ingested(appended.mentioned);

        self.spawn_compaction(&appended.session_id);
        Some(appended)
    }

    /// Wait for every compaction pass spawned so far.
    pub async fn flush(&self) {
        loop {
            let tasks = match lock(&self.active).as_mut() {
                Some(session) => session.take_tasks(),
                None => return,
            };
            if tasks.is_empty() {
                return;
            }
            join_all(tasks).await;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Answer a question from the condensed context of the active session.
    pub async fn answer_question(&self, question: &str) -> ProviderResponse {
        if !self.store.is_active() {
            return ProviderResponse::no_active_session();
        }
        let context = self.store.condensed_context();
        let response = self.orchestrator.answer_question(question, &context).await;
        lock(&self.observability)
            .metrics
            .session
            .question(response.success);
        self.sync_observability();
        response
    }

    pub fn stats(&self) -> MeetingStats {
        self.store.stats()
    }

    pub fn condensed_context(&self) -> String {
        self.store.condensed_context()
    }

    pub fn status(&self) -> SessionStatus {
        if let Some(session_id) = lock(&self.finalizing).clone() {
            return SessionStatus::Finalizing { session_id };
        }
        match lock(&self.active).as_ref() {
            Some(session) => SessionStatus::Active {
                session_id: session.session_id.clone(),
                started_at: session.started_at,
            },
            None => SessionStatus::Idle,
        }
    }

    /// Compaction passes of the active session still running.
    pub fn in_flight(&self) -> usize {
        lock(&self.active).as_ref().map_or(0, ActiveSession::in_flight)
    }

    // ── Observability ───────────────────────────────────────────────────

    /// Every degradation recorded so far, including recovered ones.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.sync_observability();
        lock(&self.observability).degradation.events().to_vec()
    }

    pub fn degradation_alerts(&self) -> Vec<DegradationAlert> {
        self.sync_observability();
        lock(&self.observability).degradation_alerts()
    }

    /// Metrics and degradation counts as JSON.
    pub fn metrics(&self) -> MinutesResult<serde_json::Value> {
        self.sync_observability();
        lock(&self.observability).metrics_snapshot()
    }

    /// Pull degradations, recoveries and provider metrics from the
    /// orchestrator, applying the signals in the order they happened.
    fn sync_observability(&self) {
        let signals = self.orchestrator.drain_signals();
        let providers = self.orchestrator.metrics();
        let mut obs = lock(&self.observability);
        for signal in signals {
            match signal {
                ProviderSignal::Degraded(event) => obs.record_degradation(event),
                ProviderSignal::Recovered { component } => obs.mark_recovered(&component),
            }
        }
        obs.set_provider_metrics(providers);
    }

    // ── Background work ─────────────────────────────────────────────────

    fn spawn_compaction(&self, session_id: &str) {
        let Ok(handle) = Handle::try_current() else {
            warn!("no async runtime, compaction skipped; trimming inline");
            self.store.trim_recent();
            return;
        };
        let mut active = lock(&self.active);
        let Some(session) = active.as_mut().filter(|s| s.session_id == session_id) else {
            // Finalizing or replaced: the chunk is kept, compaction is not.
            self.store.trim_recent();
            return;
        };
        let scheduler = self.scheduler.clone();
        let observability = self.observability.clone();
        let cancel = session.cancel.child_token();
        let task = handle.spawn(
            async move {
                let report = scheduler.on_chunk_appended(&cancel).await;
                record_report(&observability, &report);
            }
            .in_current_span(),
        );
        session.track(task);
    }

    fn spawn_ticker(&self, cancel: &CancellationToken) -> Option<tokio::task::JoinHandle<()>> {
        if self.config.duration_refresh_secs == 0 {
            return None;
        }
        let handle = Handle::try_current().ok()?;
        let store = self.store.clone();
        let cancel = cancel.child_token();
        let period = Duration::from_secs(self.config.duration_refresh_secs);
        Some(handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if store.refresh_duration().is_none() {
                            break;
                        }
                    }
                }
            }
        }))
    }
}

fn record_report(observability: &Mutex<ObservabilityEngine>, report: &CompactionReport) {
    let mut obs = lock(observability);
    for (level, outcome) in report.attempts() {
        obs.metrics
            .compaction
            .record_attempt(level, outcome.attempt_outcome());
    }
    if report.trimmed > 0 {
        obs.metrics.compaction.record_trim(report.trimmed);
    }
    if report.contended {
        obs.metrics.compaction.record_contention();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

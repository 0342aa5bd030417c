//! CompactionScheduler: post-append compaction with an `AtomicBool` single-execution guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

use minutes_context::ContextStore;
use minutes_core::config::CompactionConfig;
use minutes_core::errors::{CompactionError, CompactionLevel, MinutesError};
use minutes_core::keywords;
use minutes_core::models::{MicroSummary, SummaryRequest};
use minutes_core::traits::Clock;
use minutes_observability::compaction_span;
use minutes_observability::tracing_setup::events;
use minutes_providers::{ProviderOrchestrator, SummaryOutcome};

use crate::report::{CompactionReport, LevelOutcome};
use crate::scheduling::{evaluate_triggers, TriggerReason, TriggerSignals};

/// Runs after every appended chunk.
///
/// At most one compaction runs at a time; a trigger that finds the guard
/// held only trims. Provider calls happen outside the store lock.
pub struct CompactionScheduler {
    store: Arc<ContextStore>,
    orchestrator: Arc<ProviderOrchestrator>,
    config: CompactionConfig,
    clock: Arc<dyn Clock>,
    /// Guard: only one compaction can run at a time.
    is_running: Arc<AtomicBool>,
}

/// Releases the guard on drop, including when the pass is cancelled mid-await.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CompactionScheduler {
    pub fn new(
        store: Arc<ContextStore>,
        orchestrator: Arc<ProviderOrchestrator>,
        config: CompactionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            config,
            clock,
            is_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Evaluate both levels, run what is due, then always trim.
    pub async fn on_chunk_appended(&self, cancel: &CancellationToken) -> CompactionReport {
        let mut report = CompactionReport::default();
        if let Some(guard) = self.try_acquire() {
            self.run_due(&mut report, cancel).await;
            drop(guard);
        } else if self.anything_due() {
            debug!("compaction already in progress, trimming only");
            report.contended = true;
        }
        report.trimmed = self.store.trim_recent();
        report
    }

    fn try_acquire(&self) -> Option<RunningGuard<'_>> {
        self.is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunningGuard(&self.is_running))
    }

    fn signals(&self) -> Option<(String, TriggerSignals)> {
        let now = self.clock.now_millis();
        self.store
            .compaction_view()
            .map(|(id, view)| (id, TriggerSignals::from_view(&view, now)))
    }

    fn anything_due(&self) -> bool {
        self.signals()
            .is_some_and(|(_, s)| !evaluate_triggers(&s, &self.config).is_empty())
    }

    async fn run_due(&self, report: &mut CompactionReport, cancel: &CancellationToken) {
        let Some((session_id, signals)) = self.signals() else {
            return;
        };
        let mut due = evaluate_triggers(&signals, &self.config);
        if due.contains(&TriggerReason::Micro) {
            let outcome = self
                .run_micro(&session_id, signals.now, cancel)
                .instrument(compaction_span!(CompactionLevel::Micro, session_id.as_str()))
                .await;
            report.micro = Some(outcome);

            // A micro-summary just applied may complete a section batch.
            let Some((_, signals)) = self.signals() else {
                return;
            };
            due = evaluate_triggers(&signals, &self.config);
        }
        if due.contains(&TriggerReason::Section) {
            let outcome = self
                .run_section(&session_id, cancel)
                .instrument(compaction_span!(CompactionLevel::Section, session_id.as_str()))
                .await;
            report.section = Some(outcome);
        }
    }

    async fn run_micro(&self, session_id: &str, now: i64, cancel: &CancellationToken) -> LevelOutcome {
        let level = CompactionLevel::Micro;
        let Some(snapshot) = self.store.micro_snapshot() else {
            return discarded(level, session_id, "session ended");
        };
        if snapshot.session_id != session_id {
            return discarded(level, session_id, "session changed");
        }
        let Some(first) = snapshot.chunks.first() else {
            return discarded(level, session_id, "no chunks");
        };
        let start_time = first.timestamp_ms;
        let covered = snapshot.chunks.len();

        let prompt = snapshot
            .chunks
            .iter()
            .map(|c| c.prompt_line())
            .collect::<Vec<_>>()
            .join("\n");
        let request = SummaryRequest::micro(prompt).with_max_words(self.config.micro_max_words);

        let summary = match self.generate(level, session_id, &request, cancel).await {
            Ok(outcome) => outcome,
            Err(outcome) => return outcome,
        };

        let text = summary.text.trim().to_string();
        let micro = MicroSummary {
            topics: keywords::extract_topics(&text),
            summary: text,
            start_time,
            end_time: now,
        };
        match self.store.apply_micro_summary(session_id, micro) {
            Ok(()) => {
                events::compaction_completed("micro", session_id, covered);
                LevelOutcome::Applied {
                    provider: summary.provider,
                    covered,
                }
            }
            Err(e) => discarded(level, session_id, &e.to_string()),
        }
    }

    async fn run_section(&self, session_id: &str, cancel: &CancellationToken) -> LevelOutcome {
        let level = CompactionLevel::Section;
        let Some(snapshot) = self.store.section_snapshot(self.config.section_batch_size) else {
            return discarded(level, session_id, "not enough micro summaries");
        };
        if snapshot.session_id != session_id {
            return discarded(level, session_id, "session changed");
        }

        let prompt = snapshot
            .micros
            .iter()
            .map(|m| m.summary.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let request = SummaryRequest::section(prompt).with_max_words(self.config.section_max_words);

        let summary = match self.generate(level, session_id, &request, cancel).await {
            Ok(outcome) => outcome,
            Err(outcome) => return outcome,
        };

        let covered = snapshot.micros.len();
        match self.store.apply_section_summary(
            session_id,
            &snapshot.micros,
            summary.text.trim().to_string(),
        ) {
            Ok(()) => {
                events::compaction_completed("section", session_id, covered);
                LevelOutcome::Applied {
                    provider: summary.provider,
                    covered,
                }
            }
            Err(e) => discarded(level, session_id, &e.to_string()),
        }
    }

    /// Ask the orchestrator, racing cancellation. `Err` carries the final outcome.
    async fn generate(
        &self,
        level: CompactionLevel,
        session_id: &str,
        request: &SummaryRequest,
        cancel: &CancellationToken,
    ) -> Result<SummaryOutcome, LevelOutcome> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(discarded(level, session_id, "cancelled"));
            }
            result = self.orchestrator.try_generate_summary(request) => result,
        };
        if cancel.is_cancelled() {
            return Err(discarded(level, session_id, "cancelled"));
        }
        result.map_err(|e| {
            let reason = match e {
                MinutesError::ProviderError(p) => p.to_string(),
                other => other.to_string(),
            };
            events::compaction_skipped(&level.to_string(), session_id, &reason);
            LevelOutcome::Failed(CompactionError::Skipped { level, reason })
        })
    }
}

fn discarded(level: CompactionLevel, session_id: &str, reason: &str) -> LevelOutcome {
    debug!(level = %level, session_id, reason, "compaction result discarded");
    LevelOutcome::Discarded {
        reason: reason.to_string(),
    }
}

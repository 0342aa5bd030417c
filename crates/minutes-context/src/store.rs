//! ContextStore: the single source of truth for the active session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use minutes_core::config::SessionConfig;
use minutes_core::errors::{CompactionError, CompactionLevel, MinutesError, MinutesResult};
use minutes_core::models::{ActionItem, Decision, MeetingStats, MicroSummary, TranscriptChunk};
use minutes_core::traits::Clock;

use crate::context::{CompactionView, MeetingContext};
use crate::render::{self, CondensedLimits};

/// Outcome of appending a chunk to the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkAppended {
    pub session_id: String,
    /// The chunk mentions the session subject.
    pub mentioned: bool,
    /// Chunks retained after the append, before any trim.
    pub retained: usize,
}

/// Chunks copied out for a micro compaction.
#[derive(Debug, Clone)]
pub struct MicroSnapshot {
    pub session_id: String,
    pub chunks: Vec<TranscriptChunk>,
}

/// The oldest micro-summaries copied out for a section compaction.
#[derive(Debug, Clone)]
pub struct SectionSnapshot {
    pub session_id: String,
    pub micros: Vec<MicroSummary>,
}

/// Holds at most one [`MeetingContext`] behind one mutex.
///
/// Every method takes the lock for a short synchronous section and never
/// across an await point. A poisoned lock is recovered.
pub struct ContextStore {
    active: Mutex<Option<MeetingContext>>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl ContextStore {
    pub fn new(config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            active: Mutex::new(None),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Install a fresh session, replacing any existing one. Returns a snapshot.
    pub fn start_session(&self, subject_name: &str) -> MeetingContext {
        let ctx = MeetingContext::new(subject_name, self.clock.now_millis());
        let mut guard = self.lock();
        if let Some(previous) = guard.take() {
            info!(session_id = %previous.session_id, "replacing active session");
        }
        info!(session_id = %ctx.session_id, subject = subject_name, "session started");
        *guard = Some(ctx.clone());
        ctx
    }

    /// Detach and return the active session.
    pub fn end_session(&self) -> Option<MeetingContext> {
        let mut ctx = self.lock().take()?;
        ctx.refresh_duration(self.clock.now_millis());
        info!(
            session_id = %ctx.session_id,
            duration_minutes = ctx.duration_minutes(),
            transcript_count = ctx.transcript_count,
            "session detached"
        );
        Some(ctx)
    }

    /// Append a chunk. `None` when no session is active.
    pub fn append_chunk(&self, chunk: TranscriptChunk) -> Option<ChunkAppended> {
        let now = self.clock.now_millis();
        let mut guard = self.lock();
        let ctx = guard.as_mut()?;
        let mentioned = ctx.append_chunk(chunk, now);
        Some(ChunkAppended {
            session_id: ctx.session_id.clone(),
            mentioned,
            retained: ctx.recent_chunks.len(),
        })
    }

    /// Drop the oldest chunks beyond the retention bound. Returns how many.
    pub fn trim_recent(&self) -> usize {
        let max = self.config.max_recent_chunks;
        let dropped = self
            .update(|ctx| ctx.trim_recent(max))
            .unwrap_or_default();
        if dropped > 0 {
            debug!(dropped, max, "trimmed recent chunks");
        }
        dropped
    }

    /// Condensed question-answering context. Empty with no session.
    pub fn condensed_context(&self) -> String {
        let limits = CondensedLimits::from(&self.config);
        self.read(|ctx| render::condensed_context(ctx, limits))
            .unwrap_or_default()
    }

    /// Recompute the derived duration from the clock. Returns the new value.
    pub fn refresh_duration(&self) -> Option<i64> {
        let now = self.clock.now_millis();
        self.update(|ctx| {
            ctx.refresh_duration(now);
            ctx.duration_minutes()
        })
    }

    pub fn snapshot(&self) -> Option<MeetingContext> {
        self.read(MeetingContext::clone)
    }

    pub fn stats(&self) -> MeetingStats {
        self.read(MeetingContext::stats).unwrap_or_default()
    }

    pub fn session_id(&self) -> Option<String> {
        self.read(|ctx| ctx.session_id.clone())
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Track a decision on the active session. `false` if absent or duplicate.
    pub fn track_decision(&self, decision: Decision) -> bool {
        self.update(|ctx| ctx.track_decision(decision))
            .unwrap_or(false)
    }

    /// Track an action item on the active session. `false` if absent or duplicate.
    pub fn track_action_item(&self, item: ActionItem) -> bool {
        self.update(|ctx| ctx.track_action_item(item))
            .unwrap_or(false)
    }

    /// Session id and trigger inputs, copied under one lock.
    pub fn compaction_view(&self) -> Option<(String, CompactionView)> {
        self.read(|ctx| (ctx.session_id.clone(), ctx.compaction_view()))
    }

    /// Copy of every retained chunk for a micro compaction prompt.
    pub fn micro_snapshot(&self) -> Option<MicroSnapshot> {
        self.read(|ctx| MicroSnapshot {
            session_id: ctx.session_id.clone(),
            chunks: ctx.recent_chunks.clone(),
        })
    }

    /// Copy of the `batch` oldest micro-summaries. `None` if fewer exist.
    pub fn section_snapshot(&self, batch: usize) -> Option<SectionSnapshot> {
        self.read(|ctx| {
            (ctx.micro_summaries.len() >= batch).then(|| SectionSnapshot {
                session_id: ctx.session_id.clone(),
                micros: ctx.micro_summaries[..batch].to_vec(),
            })
        })
        .flatten()
    }

    /// Append a micro-summary produced for `session_id`.
    pub fn apply_micro_summary(&self, session_id: &str, summary: MicroSummary) -> MinutesResult<()> {
        let mut guard = self.lock();
        let ctx = current(&mut guard, session_id)?;
        ctx.push_micro_summary(summary);
        debug!(session_id, micro_count = ctx.micro_summaries.len(), "micro summary applied");
        Ok(())
    }

    /// Fold `covered` into `section`. Fails without mutating if `covered` is
    /// no longer the front of the micro-summary list.
    pub fn apply_section_summary(
        &self,
        session_id: &str,
        covered: &[MicroSummary],
        section: String,
    ) -> MinutesResult<()> {
        let now = self.clock.now_millis();
        let mut guard = self.lock();
        let ctx = current(&mut guard, session_id)?;
        if !ctx.micro_summaries.starts_with(covered) {
            return Err(CompactionError::StaleSnapshot {
                level: CompactionLevel::Section,
            }
            .into());
        }
        ctx.fold_section(covered.len(), section, now);
        debug!(
            session_id,
            section_count = ctx.section_summaries.len(),
            micro_count = ctx.micro_summaries.len(),
            "section summary applied"
        );
        Ok(())
    }

    /// Run `f` against the active session.
    pub fn read<R>(&self, f: impl FnOnce(&MeetingContext) -> R) -> Option<R> {
        self.lock().as_ref().map(f)
    }

    fn update<R>(&self, f: impl FnOnce(&mut MeetingContext) -> R) -> Option<R> {
        self.lock().as_mut().map(f)
    }

    fn lock(&self) -> MutexGuard<'_, Option<MeetingContext>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn current<'a>(
    guard: &'a mut MutexGuard<'_, Option<MeetingContext>>,
    session_id: &str,
) -> MinutesResult<&'a mut MeetingContext> {
    match guard.as_mut() {
        Some(ctx) if ctx.session_id == session_id => Ok(ctx),
        _ => Err(MinutesError::SessionChanged {
            session_id: session_id.to_string(),
        }),
    }
}

//! Background work owned by the active session.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Runtime-side handle of the active session.
///
/// Every compaction task spawned for the session is tracked here; the token
/// is cancelled when the session ends or is cancelled.
pub(crate) struct ActiveSession {
    pub session_id: String,
    pub started_at: i64,
    pub cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl ActiveSession {
    pub fn new(session_id: String, started_at: i64) -> Self {
        Self {
            session_id,
            started_at,
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
            ticker: None,
        }
    }

    pub fn set_ticker(&mut self, ticker: JoinHandle<()>) {
        self.ticker = Some(ticker);
    }

    /// Track a task, forgetting the ones already finished.
    pub fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(task);
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Take the tracked tasks, leaving the session with none.
    pub fn take_tasks(&mut self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut self.tasks)
    }

    /// Stop the ticker and hand over the token and the compaction tasks,
    /// which keep running until awaited or cancelled.
    pub fn finish(mut self) -> (CancellationToken, Vec<JoinHandle<()>>) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        let tasks = self.take_tasks();
        (self.cancel, tasks)
    }

    /// Cancel all background work and return the tasks to await.
    pub fn shut_down(self) -> Vec<JoinHandle<()>> {
        let (cancel, tasks) = self.finish();
        cancel.cancel();
        for task in &tasks {
            task.abort();
        }
        tasks
    }
}

/// Await every task. A panicked task is logged and skipped.
pub(crate) async fn join_all(tasks: Vec<JoinHandle<()>>) {
    for task in tasks {
        if let Err(e) = task.await {
            if e.is_panic() {
                warn!(error = %e, "compaction task panicked");
            }
        }
    }
}

/// Await `tasks` for at most `grace`, then cancel and abort the rest.
///
/// Returns `true` if everything finished within the grace period.
pub(crate) async fn drain_with_grace(
    tasks: Vec<JoinHandle<()>>,
    grace: Duration,
    cancel: &CancellationToken,
) -> bool {
    if tasks.is_empty() {
        return true;
    }
    let count = tasks.len();
    let aborts: Vec<_> = tasks.iter().map(JoinHandle::abort_handle).collect();
    match tokio::time::timeout(grace, join_all(tasks)).await {
        Ok(()) => {
            debug!(tasks = count, "in-flight work finished");
            true
        }
        Err(_) => {
            warn!(
                tasks = count,
                grace_ms = grace.as_millis() as u64,
                "grace period elapsed, cancelling in-flight work"
            );
            cancel.cancel();
            for handle in aborts {
                handle.abort();
            }
            false
        }
    }
}

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use minutes_core::errors::{MinutesResult, ProviderError};
use minutes_core::models::{ProviderKind, ProviderResponse, SummaryRequest, SummaryType};
use minutes_core::traits::CompletionProvider;

/// What a scripted provider does on one call.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Succeed with this text.
    Reply(String),
    /// Return `Err(ProviderError::RequestFailed)`.
    Fail(String),
    /// Answer with an `Error:`-prefixed summary / a flagged failure response.
    ErrorText(String),
    /// Succeed with an empty string.
    Empty,
    /// Sleep, then succeed with this text.
    Delayed(Duration, String),
}

/// A provider whose answers are scripted per call.
///
/// Summary requests with a per-type outcome always get it. Otherwise queued
/// outcomes are consumed first; afterwards every call gets the fallback. All calls and summary requests are recorded.
pub struct ScriptedProvider {
    kind: ProviderKind,
    queue: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    by_type: HashMap<SummaryType, Outcome>,
    calls: AtomicUsize,
    requests: Mutex<Vec<SummaryRequest>>,
    questions: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn new(kind: ProviderKind, fallback: Outcome) -> Self {
        Self {
            kind,
            queue: Mutex::new(VecDeque::new()),
            fallback,
            by_type: HashMap::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Always succeeds with `text`.
    pub fn replying(kind: ProviderKind, text: impl Into<String>) -> Self {
        Self::new(kind, Outcome::Reply(text.into()))
    }

    /// Always fails.
    pub fn failing(kind: ProviderKind) -> Self {
        Self::new(kind, Outcome::Fail(format!("{} is down", kind)))
    }

    /// Queue outcomes consumed before the fallback applies.
    pub fn with_script(self, script: impl IntoIterator<Item = Outcome>) -> Self {
        self.queue.lock().unwrap().extend(script);
        self
    }

    /// Always answer summary requests of `summary_type` with `outcome`.
    pub fn on_summary(mut self, summary_type: SummaryType, outcome: Outcome) -> Self {
        self.by_type.insert(summary_type, outcome);
        self
    }

    /// Total calls of either method.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn summary_requests(&self) -> Vec<SummaryRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded `(question, context)` pairs.
    pub fn questions(&self) -> Vec<(String, String)> {
        self.questions.lock().unwrap().clone()
    }

    fn next(&self) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn failure(&self, reason: String) -> ProviderError {
        ProviderError::RequestFailed {
            provider: self.kind.to_string(),
            reason,
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn answer_question(
        &self,
        question: &str,
        context: &str,
    ) -> MinutesResult<ProviderResponse> {
        self.questions
            .lock()
            .unwrap()
            .push((question.to_string(), context.to_string()));
        match self.next() {
            Outcome::Reply(text) => Ok(ProviderResponse::ok(self.kind, text)),
            Outcome::Fail(reason) => Err(self.failure(reason).into()),
            Outcome::ErrorText(reason) => Ok(ProviderResponse::failed(self.kind, reason)),
            Outcome::Empty => Ok(ProviderResponse::ok(self.kind, "")),
            Outcome::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(ProviderResponse::ok(self.kind, text))
            }
        }
    }

    async fn generate_summary(&self, request: &SummaryRequest) -> MinutesResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = match self.by_type.get(&request.summary_type) {
            Some(outcome) => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                outcome.clone()
            }
            None => self.next(),
        };
        match outcome {
            Outcome::Reply(text) => Ok(text),
            Outcome::Fail(reason) => Err(self.failure(reason).into()),
            Outcome::ErrorText(reason) => Ok(format!("Error: {reason}")),
            Outcome::Empty => Ok(String::new()),
            Outcome::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }
}

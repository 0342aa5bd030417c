//! Ordered fallback across completion providers.
//!
//! Order: preferred provider (if configured) → remaining providers in
//! [`ProviderKind`] declaration order. Every call is bounded by a timeout;
//! failures are logged and the next provider is tried. Each fallback past
//! the first provider is recorded as a degradation event; the next success
//! on the first provider for that component is recorded as a recovery.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, warn, Instrument};

use minutes_core::constants::{ERROR_PREFIX, SUMMARY_FAILED_SENTINEL};
use minutes_core::errors::{MinutesError, MinutesResult, ProviderError};
use minutes_core::models::{DegradationEvent, ProviderKind, ProviderResponse, SummaryRequest};
use minutes_core::traits::CompletionProvider;
use minutes_observability::metrics::{CallOutcome, ProviderMetrics};
use minutes_observability::provider_span;

const ANSWER_COMPONENT: &str = "providers.answer";
const SUMMARY_COMPONENT: &str = "providers.summary";

/// A successful summary and who produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub text: String,
    pub provider: ProviderKind,
    /// Providers tried, including the winner.
    pub attempts: usize,
}

/// Degradation bookkeeping handed to observability, in the order it happened.
#[derive(Debug, Clone)]
pub enum ProviderSignal {
    Degraded(DegradationEvent),
    /// The first provider in order succeeded again for `component`.
    Recovered { component: String },
}

impl ProviderSignal {
    pub fn component(&self) -> &str {
        match self {
            Self::Degraded(event) => &event.component,
            Self::Recovered { component } => component,
        }
    }
}

#[derive(Debug, Default)]
struct SignalLog {
    signals: Vec<ProviderSignal>,
    degraded: BTreeSet<&'static str>,
}

impl SignalLog {
    fn degraded(&mut self, component: &'static str, failure: String, fallback_used: &str) {
        self.degraded.insert(component);
        self.signals.push(ProviderSignal::Degraded(DegradationEvent {
            component: component.to_string(),
            failure,
            fallback_used: fallback_used.to_string(),
            timestamp: Utc::now(),
        }));
    }

    fn recovered(&mut self, component: &'static str) {
        if self.degraded.remove(component) {
            debug!(component, "first provider answering again");
            self.signals.push(ProviderSignal::Recovered {
                component: component.to_string(),
            });
        }
    }
}

/// Owns the configured providers, keyed by kind.
pub struct ProviderOrchestrator {
    providers: BTreeMap<ProviderKind, Arc<dyn CompletionProvider>>,
    preferred: Option<ProviderKind>,
    timeout: Duration,
    signals: Mutex<SignalLog>,
    metrics: Mutex<ProviderMetrics>,
}

impl ProviderOrchestrator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            providers: BTreeMap::new(),
            preferred: None,
            timeout,
            signals: Mutex::new(SignalLog::default()),
            metrics: Mutex::new(ProviderMetrics::new()),
        }
    }

    /// Register a provider, replacing any previous one of the same kind.
    pub fn register(&mut self, provider: Arc<dyn CompletionProvider>) -> Option<Arc<dyn CompletionProvider>> {
        let kind = provider.kind();
        debug!(provider = %kind, "provider registered");
        self.providers.insert(kind, provider)
    }

    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn set_preferred(&mut self, preferred: Option<ProviderKind>) {
        self.preferred = preferred;
    }

    pub fn with_preferred(mut self, preferred: ProviderKind) -> Self {
        self.preferred = Some(preferred);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Kinds in the order they will be tried. Each configured kind appears once.
    pub fn fallback_order(&self) -> Vec<ProviderKind> {
        let preferred = self.preferred.filter(|p| self.providers.contains_key(p));
        preferred
            .into_iter()
            .chain(self.providers.keys().copied().filter(|k| Some(*k) != preferred))
            .collect()
    }

    /// Whether a summary string is the failure sentinel or otherwise unusable.
    pub fn is_summary_failure(text: &str) -> bool {
        text.trim().is_empty() || text.starts_with(ERROR_PREFIX) || text == SUMMARY_FAILED_SENTINEL
    }

    /// Answer a question; the first successful provider wins.
    pub async fn answer_question(&self, question: &str, context: &str) -> ProviderResponse {
        let order = self.fallback_order();
        if order.is_empty() {
            return ProviderResponse::not_configured();
        }

        let span = provider_span!("answer_question", order.len());
        async {
            let mut last_error = None;
            for (i, kind) in order.iter().enumerate() {
                let Some(provider) = self.providers.get(kind) else {
                    continue;
                };
                match self.call(*kind, provider.answer_question(question, context)).await {
                    Ok(mut response) if response.success => {
                        response.provider.get_or_insert(*kind);
                        self.record_fallback(ANSWER_COMPONENT, &order, i, kind.as_str());
                        return response;
                    }
                    Ok(response) => {
                        let reason = response
                            .error
                            .unwrap_or_else(|| "provider reported failure".to_string());
                        warn!(provider = %kind, error = %reason, "answer failed, trying next provider");
                        last_error = Some(reason);
                    }
                    Err(e) => {
                        warn!(provider = %kind, error = %e, "answer failed, trying next provider");
                        last_error = Some(e.to_string());
                    }
                }
            }
            self.record_exhausted(ANSWER_COMPONENT, &order);
            ProviderResponse::all_failed(order.len(), last_error)
        }
        .instrument(span)
        .await
    }

    /// Generate a summary, returning the failure sentinel if nothing succeeded.
    pub async fn generate_summary(&self, request: &SummaryRequest) -> String {
        match self.try_generate_summary(request).await {
            Ok(outcome) => outcome.text,
            Err(_) => SUMMARY_FAILED_SENTINEL.to_string(),
        }
    }

    /// Generate a summary with a typed error.
    ///
    /// Only non-empty text without the reserved error prefix is accepted.
    /// Returns `ProviderError::NotConfigured` with no providers and
    /// `ProviderError::Exhausted` when every provider failed.
    pub async fn try_generate_summary(&self, request: &SummaryRequest) -> MinutesResult<SummaryOutcome> {
        let order = self.fallback_order();
        if order.is_empty() {
            return Err(ProviderError::NotConfigured.into());
        }

        let span = provider_span!(request.summary_type, order.len());
        async {
            for (i, kind) in order.iter().enumerate() {
                let Some(provider) = self.providers.get(kind) else {
                    continue;
                };
                match self.call(*kind, provider.generate_summary(request)).await {
                    Ok(text) if !Self::is_summary_failure(&text) => {
                        self.record_fallback(SUMMARY_COMPONENT, &order, i, kind.as_str());
                        return Ok(SummaryOutcome {
                            text,
                            provider: *kind,
                            attempts: i + 1,
                        });
                    }
                    Ok(text) => {
                        warn!(
                            provider = %kind,
                            summary_type = %request.summary_type,
                            empty = text.trim().is_empty(),
                            "unusable summary, trying next provider"
                        );
                    }
                    Err(e) => {
                        warn!(
                            provider = %kind,
                            summary_type = %request.summary_type,
                            error = %e,
                            "summary failed, trying next provider"
                        );
                    }
                }
            }
            self.record_exhausted(SUMMARY_COMPONENT, &order);
            Err(ProviderError::Exhausted {
                attempted: order.len(),
            }
            .into())
        }
        .instrument(span)
        .await
    }

    /// Take every degradation and recovery recorded so far, oldest first.
    pub fn drain_signals(&self) -> Vec<ProviderSignal> {
        std::mem::take(&mut lock(&self.signals).signals)
    }

    /// Snapshot of per-provider call metrics.
    pub fn metrics(&self) -> ProviderMetrics {
        lock(&self.metrics).clone()
    }

    async fn call<T>(
        &self,
        kind: ProviderKind,
        fut: impl Future<Output = MinutesResult<T>>,
    ) -> Result<T, ProviderError> {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(MinutesError::ProviderError(e))) => Err(e),
            Ok(Err(e)) => Err(ProviderError::RequestFailed {
                provider: kind.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ProviderError::Timeout {
                provider: kind.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };
        let outcome = match &result {
            Ok(_) => CallOutcome::Success,
            Err(ProviderError::Timeout { .. }) => CallOutcome::Timeout,
            Err(_) => CallOutcome::Failure,
        };
        lock(&self.metrics).record(kind, outcome, started.elapsed());
        result
    }

    fn record_fallback(&self, component: &'static str, order: &[ProviderKind], index: usize, used: &str) {
        let mut log = lock(&self.signals);
        if index == 0 {
            log.recovered(component);
            return;
        }
        let primary = order.first().map(ProviderKind::as_str).unwrap_or("unknown");
        log.degraded(component, format!("{primary} failed"), used);
    }

    fn record_exhausted(&self, component: &'static str, order: &[ProviderKind]) {
        let tried: Vec<&str> = order.iter().map(ProviderKind::as_str).collect();
        lock(&self.signals).degraded(
            component,
            format!("all providers failed: {}", tried.join(", ")),
            "none",
        );
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

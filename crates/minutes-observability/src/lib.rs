//! # minutes-observability
//!
//! Structured tracing setup, span and event definitions, degradation
//! tracking with alerting, and metrics for compaction, providers, and
//! sessions.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{
    AlertLevel, DegradationAlert, DegradationTracker, RecoveryStatus, TrackedDegradation,
};
pub use engine::ObservabilityEngine;
pub use metrics::{
    AttemptOutcome, CallOutcome, CompactionMetrics, MetricsCollector, ProviderMetrics,
    SessionMetrics,
};

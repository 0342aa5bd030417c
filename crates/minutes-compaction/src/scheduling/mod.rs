//! Compaction triggers.

pub mod triggers;

pub use triggers::{evaluate_triggers, TriggerReason, TriggerSignals};

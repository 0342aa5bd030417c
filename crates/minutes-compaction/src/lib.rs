//! # minutes-compaction
//!
//! Turns the raw transcript into a bounded hierarchy after every append:
//! chunks → micro-summaries → section summaries.
//!
//! Trigger evaluation is pure ([`scheduling`]); the [`CompactionScheduler`]
//! snapshots the store, calls providers outside the lock, and applies the
//! result only if the session is unchanged and nothing was cancelled.

pub mod engine;
pub mod report;
pub mod scheduling;

pub use engine::CompactionScheduler;
pub use report::{CompactionReport, LevelOutcome};
pub use scheduling::{evaluate_triggers, TriggerReason, TriggerSignals};

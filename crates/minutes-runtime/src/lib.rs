//! # minutes-runtime
//!
//! [`MeetingRuntime`] ties the workspace together: it owns the context store,
//! the provider orchestrator, the compaction scheduler and the minutes
//! generator, tracks the background tasks of the active session, and hands
//! the final record to a [`MinutesSink`](minutes_core::traits::MinutesSink).

mod runtime;
mod session;
pub mod sink;

pub use runtime::{MeetingRuntime, SessionStarted};
pub use sink::TracingSink;

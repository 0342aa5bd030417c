//! # minutes-context
//!
//! The authoritative state of the one active session: a [`MeetingContext`]
//! aggregate behind a single mutex in [`ContextStore`]. Every read and write
//! is a short synchronous critical section; provider calls never happen while
//! the lock is held.

pub mod context;
pub mod render;
pub mod store;

pub use context::{CompactionView, MeetingContext};
pub use render::CondensedLimits;
pub use store::{ChunkAppended, ContextStore, MicroSnapshot, SectionSnapshot};

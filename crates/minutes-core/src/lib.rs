//! # minutes-core
//!
//! Foundation crate for the live session minutes system.
//! Defines all types, traits, errors, config, constants, and the keyword
//! heuristics shared by compaction and minutes generation.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod keywords;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MinutesConfig;
pub use errors::{MinutesError, MinutesResult};
pub use models::{
    ActionItem, Decision, MicroSummary, ProviderKind, ProviderResponse, SummaryRequest,
    SummaryType, TranscriptChunk,
};
pub use traits::{Clock, CompletionProvider, MinutesSink, SystemClock};

//! # minutes-generator
//!
//! Produces the [`MinutesRecord`](minutes_core::models::MinutesRecord) when a
//! session ends: merges tracked, provider-extracted, and keyword-detected
//! decisions and action items, and picks a summary strategy by session length
//! and provider availability.

pub mod extraction;
pub mod format;
pub mod generator;
pub mod summary;

pub use generator::MinutesGenerator;

//! Default values shared by the config sections.

use crate::constants;

pub const DEFAULT_MAX_RECENT_CHUNKS: usize = constants::MAX_RECENT_CHUNKS;
pub const DEFAULT_CONDENSED_RECENT_CHUNKS: usize = constants::CONDENSED_RECENT_CHUNKS;
pub const DEFAULT_CONDENSED_MICRO_SUMMARIES: usize = constants::CONDENSED_MICRO_SUMMARIES;

pub const DEFAULT_MICRO_MIN_CHUNKS: usize = constants::MICRO_MIN_CHUNKS;
pub const DEFAULT_MICRO_INTERVAL_SECS: u64 = (constants::MICRO_INTERVAL_MS / 1000) as u64;
pub const DEFAULT_MICRO_MAX_WORDS: usize = constants::MICRO_MAX_WORDS;
pub const DEFAULT_SECTION_BATCH_SIZE: usize = constants::SECTION_BATCH_SIZE;
pub const DEFAULT_SECTION_INTERVAL_SECS: u64 = (constants::SECTION_INTERVAL_MS / 1000) as u64;
pub const DEFAULT_SECTION_MAX_WORDS: usize = constants::SECTION_MAX_WORDS;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = constants::DEFAULT_REQUEST_TIMEOUT_SECS;
pub const DEFAULT_LOAD_ENV_CREDENTIALS: bool = true;

pub const DEFAULT_SHORT_SESSION_MINUTES: i64 = constants::SHORT_SESSION_MINUTES;
pub const DEFAULT_INTRO_CHUNKS: usize = constants::SHORT_SESSION_INTRO_CHUNKS;
pub const DEFAULT_FALLBACK_SAMPLE_CHARS: usize = constants::FALLBACK_SAMPLE_CHARS;
pub const DEFAULT_STRUCTURED_EXTRACTION: bool = true;

pub const DEFAULT_END_GRACE_PERIOD_SECS: u64 = constants::DEFAULT_END_GRACE_PERIOD_SECS;
pub const DEFAULT_DURATION_REFRESH_SECS: u64 = 60;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

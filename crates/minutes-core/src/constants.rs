/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of raw chunks retained after a post-append trim.
pub const MAX_RECENT_CHUNKS: usize = 20;

/// Minimum retained chunks before a micro compaction is considered.
pub const MICRO_MIN_CHUNKS: usize = 5;

/// Minimum time between micro compactions (5 minutes).
pub const MICRO_INTERVAL_MS: i64 = 5 * 60 * 1000;

/// Micro-summaries folded into one section summary.
pub const SECTION_BATCH_SIZE: usize = 3;

/// Minimum time between section compactions (30 minutes).
pub const SECTION_INTERVAL_MS: i64 = 30 * 60 * 1000;

/// Word limit requested for micro-summaries.
pub const MICRO_MAX_WORDS: usize = 100;

/// Word limit requested for section summaries.
pub const SECTION_MAX_WORDS: usize = 50;

/// Recent chunks rendered into the condensed context.
pub const CONDENSED_RECENT_CHUNKS: usize = 10;

/// Micro-summaries rendered into the condensed context.
pub const CONDENSED_MICRO_SUMMARIES: usize = 3;

/// Sessions shorter than this skip the provider for the final summary.
pub const SHORT_SESSION_MINUTES: i64 = 2;

/// Chunks used to synthesize a short-session summary.
pub const SHORT_SESSION_INTRO_CHUNKS: usize = 3;

/// Characters of transcript sampled by the templated fallback summary.
pub const FALLBACK_SAMPLE_CHARS: usize = 200;

/// Reserved prefix marking a provider result as an error.
pub const ERROR_PREFIX: &str = "Error:";

/// Returned by the orchestrator when every provider failed to summarize.
pub const SUMMARY_FAILED_SENTINEL: &str = "Error: summary generation failed";

/// Default per-call provider timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default grace period session end waits for in-flight work.
pub const DEFAULT_END_GRACE_PERIOD_SECS: u64 = 10;

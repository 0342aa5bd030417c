//! Tracing setup: subscriber initialization, span definitions, event helpers.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

use minutes_core::config::ObservabilityConfig;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV_VAR: &str = "MINUTES_LOG";

/// Install the global subscriber.
///
/// `MINUTES_LOG` wins over `config.log_level`. Returns `false` if a global
/// subscriber was already installed.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}

/// Initialize with a custom filter string (for tests or embedding).
pub fn init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}

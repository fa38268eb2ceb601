use crate::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber using the configured filter directive.
///
/// Returns false when a subscriber was already installed.
pub fn init_tracing(config: &AppConfig) -> bool {
    let filter = build_filter(config.effective_log_filter());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .is_ok()
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}", directive, e);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

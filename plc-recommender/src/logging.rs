//! Log filter selection for the binary

use plc_common::config::CompiledDefaults;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Filter for the configured `[logging] level`
///
/// An unparsable level falls back to the compiled default level.
pub fn level_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_new(configured).unwrap_or_else(|e| {
        let fallback = CompiledDefaults::for_current_platform().log_level;
        warn!("Invalid log level '{}' ({}), using '{}'", configured, e, fallback);
        EnvFilter::new(fallback)
    })
}

/// `RUST_LOG` when set, else [`level_filter`] of the configured level
pub fn env_or_level_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(configured))
}

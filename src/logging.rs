//! Tracing subscriber setup for the binary. The library itself only emits
//! events and never installs a subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "PATHOPS_LOG";

/// Install a stderr `fmt` subscriber filtered by `$PATHOPS_LOG`, falling
/// back to `default_filter` (e.g. `"info"`). A second call is a no-op.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

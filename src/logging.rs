//! Diagnostics on stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives (`debug`, `wlast=trace`, ...).
pub const LOG_ENV: &str = "WLAST_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. stdout stays reserved for the report.
///
/// An unparsable `WLAST_LOG` falls back to `warn`. Calling this twice is a
/// no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

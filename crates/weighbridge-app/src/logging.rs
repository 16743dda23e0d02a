//! Logging initialisation (tracing + tracing-subscriber)
//!
//! `RUST_LOG` overrides the default level, e.g. `RUST_LOG=weighbridge_infra=debug`.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global subscriber. `verbose` raises the default level to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Subscriber for tests, written through the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

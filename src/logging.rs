use std::io;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = concat!(env!("CARGO_PKG_NAME"), "=warn");

/// Send log events to stderr, filtered by `RUST_LOG`
pub(crate) fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

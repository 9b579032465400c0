//! Diagnostic logging to stderr.
//!
//! User-facing output goes through `println!`; tracing events carry the
//! details of skipped files, swallowed I/O errors and per-file dispatch.

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive, e.g. `langprune=trace`.
pub const LOG_ENV: &str = "LANGPRUNE_LOG";

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init(verbose: bool) {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let subscriber = Registry::default()
        .with(build_env_filter(verbose))
        .with(stderr_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. Stdout is reserved for the result
//! report.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with `--debug` and
/// `warn` without. Calling this twice is harmless.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

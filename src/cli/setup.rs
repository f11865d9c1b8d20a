//! Runtime setup for the CLI: logging.

use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the tracing subscriber once. `RUST_LOG` wins over `-v`.
/// Logs go to stderr so stdout stays usable for JSON and HTML output.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

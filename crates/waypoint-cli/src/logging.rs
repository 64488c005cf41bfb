//! Process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr so table output on
/// stdout stays clean.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` means `debug` and
/// `log_level` (default `warn`) applies.
pub fn init(log_level: Option<&str>, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        log_level.unwrap_or("warn")
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

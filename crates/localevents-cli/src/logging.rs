// Logging setup

use tracing::Level;

/// Map a configured level name onto a tracing level; unknown names fall back
/// to `info`
pub fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// The effective level: `--verbose` always means debug
pub fn effective_level(configured: &str, verbose: bool) -> Level {
    if verbose {
        Level::DEBUG.max(parse_level(configured))
    } else {
        parse_level(configured)
    }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. Calling it twice is harmless.
pub fn init_logging(configured: &str, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(effective_level(configured, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Logging setup for the `cascade` binary.
//!
//! Level precedence: `--verbose`, then `--quiet`, then `RUST_LOG`, then
//! `settings.log_level` from `cascade.toml`, then info.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = ["cascade_graph", "cascade_config", "cascade_css", "cascade_cli"];

/// Filter directive for our own crates at `level`. `silent` turns logging off.
pub fn crate_filter(level: &str) -> String {
    let level = match level {
        "silent" => "off",
        "warning" => "warn",
        other => other,
    };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Call once, before any logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// Colors are off with `--no-color` or when `NO_COLOR` is set.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, configured_level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new(crate_filter("debug"))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(crate_filter(configured_level.unwrap_or("info")))
        })
    };

    let ansi = !no_color && std::env::var_os("NO_COLOR").is_none();
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

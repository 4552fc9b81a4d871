//! Logging infrastructure for the Lattice CLI.
//!
//! Structured logging via the `tracing` ecosystem: `--verbose` for debug,
//! `--quiet` for errors only, `RUST_LOG` for custom filters, compact
//! colored output unless disabled.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at startup, before any logging occurs. The level is picked in
/// this order: `--verbose` (debug for lattice crates), `--quiet` (errors
/// only), `RUST_LOG`, then the info-level default.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("lattice_build=debug,lattice_cli=debug")
    } else if quiet {
        EnvFilter::new("lattice_build=error,lattice_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lattice_build=info,lattice_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

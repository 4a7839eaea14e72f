//! Logging setup for the nib CLI.
//!
//! The library crates only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! The level is picked in this order:
//! 1. `--verbose`: debug for nib crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for nib crates

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "nib_config=debug,nib_build=debug,nib_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "nib_config=info,nib_build=info,nib_cli=info";

/// Build the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

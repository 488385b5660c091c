//! Diagnostics output for the CLI.
//!
//! Extraction code emits `tracing` events; this module installs the
//! subscriber that prints them to stderr. Document JSON always goes to
//! stdout, so logs never mix with it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "sveltedoc=warn";
const VERBOSE_FILTER: &str = "sveltedoc=debug";

/// Pick the event filter.
///
/// `--verbose` wins, then `RUST_LOG`, then warnings only.
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any extraction.
pub fn init_logger(verbose: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use crate::logger::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        assert!(
            build_filter(true)
                .to_string()
                .to_lowercase()
                .contains(VERBOSE_FILTER)
        );
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(false, true);
        init_logger(true, true);
    }
}

//! Logging setup for the pakt CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber. Logs go to stderr so `pakt generate --dry-run` can be piped.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "pakt=debug,pakt_cli=debug,pakt_graph=debug,pakt_config=debug,pakt_manifest=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "pakt=info,pakt_cli=info,pakt_manifest=info,warn";

/// Initialize the global tracing subscriber.
///
/// Level selection, first match wins:
/// 1. `--verbose`: debug for pakt crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for pakt crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}

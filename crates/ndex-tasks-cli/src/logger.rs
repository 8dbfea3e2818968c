//! Logging infrastructure for the ndex-tasks CLI.
//!
//! Structured logging via the `tracing` ecosystem. Verbosity is driven by
//! the global `--verbose` / `--quiet` flags, with `RUST_LOG` available for
//! custom filters.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once at startup, before any logging occurs. Level resolution:
/// `--verbose` sets debug for our crates, `--quiet` errors only, otherwise
/// `RUST_LOG` or info.
pub fn init(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("ndex_tasks=debug,ndex_tasks_cli=debug")
    } else if quiet {
        EnvFilter::new("ndex_tasks=error,ndex_tasks_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ndex_tasks=info,ndex_tasks_cli=info"))
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

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global and can only be installed once per process,
    // so these only exercise filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _ = EnvFilter::new("ndex_tasks=debug,ndex_tasks_cli=debug");
    }

    #[test]
    fn quiet_filter_parses() {
        let _ = EnvFilter::new("ndex_tasks=error,ndex_tasks_cli=error");
    }
}

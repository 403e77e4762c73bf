//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout only carries the report.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for our own crates when `verbose` is set. `LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing(verbose: bool) {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,sdetect_media=debug,sdetect_cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

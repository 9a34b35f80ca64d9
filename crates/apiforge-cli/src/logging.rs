// crates/apiforge-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Tracing subscriber setup for the apiforge binary.
// Purpose: Route library diagnostics to stderr at a user-chosen level.
// Dependencies: tracing-subscriber
// ============================================================================

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the verbosity flags.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Maps a `-v` count to a filter directive.
#[must_use]
pub const fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `verbose` when set. Output is compact and goes to
/// stderr so stdout stays reserved for command results. A second call is a
/// no-op.
pub fn init_tracing(verbose: u8) {
    let directive =
        std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| verbosity_filter(verbose).to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

//! Tracing subscriber setup for the CLI.
//!
//! Log lines always go to stderr so they never mix with member output on
//! stdout. `HTMLIDL_LOG` takes any `EnvFilter` directive and wins over the
//! flags and the configured level.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HTMLIDL_LOG";

/// Filter used when `HTMLIDL_LOG` is unset.
pub fn default_level(configured: &str, quiet: bool, verbose: bool) -> &str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    }
}

pub fn init_tracing(
    configured: &str,
    quiet: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = default_level(configured, quiet, verbose);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

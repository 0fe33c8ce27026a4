//! Tracing setup for the binary
//!
//! Diagnostics go to stderr so command output on stdout stays clean.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter (falls back to `RUST_LOG`)
pub const LOG_ENV: &str = "DAYBUDGET_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber once
///
/// `verbose` raises the default level to debug when no filter is set in
/// the environment.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| {
                EnvFilter::new(if verbose {
                    "daybudget=debug"
                } else {
                    "daybudget=info"
                })
            });

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}

//! Process-wide tracing setup.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the tracing subscriber, once per process.
///
/// The filter comes from `RUST_LOG` (default `info`); setting
/// `NSBUS_LOG_FORMAT=json` switches the output from compact text to JSON.
/// Safe to call from tests that share a process with an already-installed
/// subscriber.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        let json = std::env::var("NSBUS_LOG_FORMAT")
            .is_ok_and(|v| v.eq_ignore_ascii_case("json"));
        let result = if json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry.with(fmt::layer().compact()).try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

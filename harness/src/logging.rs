//! Diagnostic tracing for the `slidewise` binary.
//!
//! Search and harness code emit `tracing` events; nothing is printed unless
//! a subscriber is installed. The binary installs one at startup, filtered
//! by `RUST_LOG`. Solution output goes to stdout and is unaffected.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. Output: stderr,
/// compact format. Calling it twice is a no-op for the second call.
///
/// # Example
/// ```bash
/// RUST_LOG=slidewise_search=debug slidewise npuzzle 413726580
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}

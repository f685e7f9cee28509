//! Diagnostic logging
//!
//! Standard output carries protocol responses, so every log line goes to
//! standard error.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging.
///
/// `RUST_LOG` overrides the filter. The default is `warn`, or full tracing of
/// this crate when `trace` is set.
pub fn init_logging(trace: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if trace {
            EnvFilter::new("warn,rpn_kernel=trace")
        } else {
            EnvFilter::new("warn")
        }
    });

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

//! Log output setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// Verbosity flags raise the default level (`info` → `debug` → `trace`);
/// an explicit `RUST_LOG` always takes precedence.
pub fn init(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

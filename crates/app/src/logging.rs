//! Tracing subscriber setup for the desktop binary.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVES: &str = "info,app=info,quiz_core=info,storage=info,services=info,ui=info";

fn build_env_filter() -> EnvFilter {
    // RUST_LOG wins when set.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
        .try_init();
}

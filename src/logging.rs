//! Logging setup for the binaries

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info,mesh_heatmap=info";

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter,
/// e.g. `RUST_LOG=mesh_heatmap=debug` for per-phase timings.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

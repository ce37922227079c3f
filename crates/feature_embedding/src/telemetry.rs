// =============================================================================
// QKDC Feature Maps - Telemetry
// =============================================================================
// Purpose: Installs the process-wide tracing subscriber. RUST_LOG takes
//          precedence over the configured level.
// =============================================================================

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a fmt subscriber filtered at `level`.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn initialize_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

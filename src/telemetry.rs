//! Logging setup.
//!
//! Priority for the filter: `RUST_LOG` > configured level > "info".
//! Debug builds print human-readable lines, release builds emit JSON.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TelemetryConfig;

/// Installs the global tracing subscriber. Calling it twice is a no-op.
pub fn init_telemetry(config: &TelemetryConfig) {
    let level = config.log_level();
    let default_filter = format!("{level},load_planner={level}");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}

//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` when set, otherwise `moodboost_core=info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, MoodConfig};

pub const DEFAULT_FILTER: &str = "moodboost_core=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init_tracing(config: &MoodConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter());

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };

    match installed {
        Ok(()) => {
            tracing::info!(format = ?config.log_format, "Tracing initialized");
            true
        }
        Err(_) => false,
    }
}

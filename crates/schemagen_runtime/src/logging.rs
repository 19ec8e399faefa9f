//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SCHEMAGEN_LOG";

/// Installs a formatting subscriber that writes to stderr.
///
/// The filter comes from `SCHEMAGEN_LOG` when set, else `default`.
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(default: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

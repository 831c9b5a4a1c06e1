//! Store configuration loaded from environment variables.

use std::time::Duration;

/// Store tuning with sensible defaults.
///
/// Reads from environment variables:
/// - `SIMULATED_DELAY_MS` — artificial latency before every operation
///   resolves (default: `1000`)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Artificial latency applied to every load/create/update/remove call.
    pub simulated_delay: Duration,
}

impl StoreConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let millis = std::env::var("SIMULATED_DELAY_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(1000);
        Self {
            simulated_delay: Duration::from_millis(millis),
        }
    }

    /// A configuration with no artificial latency, for tests.
    pub fn immediate() -> Self {
        Self {
            simulated_delay: Duration::ZERO,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulated_delay: Duration::from_millis(1000),
        }
    }
}

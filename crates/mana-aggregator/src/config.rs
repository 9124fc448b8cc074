//! Aggregator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Upper bound for one provider call, in milliseconds
    pub provider_timeout_ms: u64,
}

impl AggregatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With provider timeout
    #[inline]
    #[must_use]
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Provider timeout as a duration
    #[inline]
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config: AggregatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.provider_timeout(), Duration::from_secs(15));

        let config = AggregatorConfig::new().with_provider_timeout(Duration::from_millis(250));
        assert_eq!(config.provider_timeout_ms, 250);
    }
}

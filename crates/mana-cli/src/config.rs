//! TOML configuration file
//!
//! ```toml
//! locale = "en_GB"
//! providers = ["leagueofgraphs", "lolflavor"]
//!
//! [aggregator]
//! provider_timeout_ms = 10000
//!
//! [provider_settings]
//! item_sets_enabled = true
//! max_starter_blocks = 2
//!
//! [http]
//! request_timeout_ms = 5000
//! ```

use anyhow::{Context, Result};
use mana_aggregator::AggregatorConfig;
use mana_providers::{HttpConfig, Locale, ProviderSettings, DEFAULT_PROVIDER_ORDER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whole-application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ManaConfig {
    /// Client display language
    pub(crate) locale: String,
    /// Provider ids in priority order
    pub(crate) providers: Vec<String>,
    pub(crate) aggregator: AggregatorConfig,
    pub(crate) provider_settings: ProviderSettings,
    pub(crate) http: HttpConfig,
}

impl ManaConfig {
    /// Read a config file; missing keys fall back to defaults
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn locale(&self) -> Locale {
        Locale::new(self.locale.clone())
    }
}

impl Default for ManaConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default().as_str().to_string(),
            providers: DEFAULT_PROVIDER_ORDER.iter().map(ToString::to_string).collect(),
            aggregator: AggregatorConfig::default(),
            provider_settings: ProviderSettings::default(),
            http: HttpConfig::default(),
        }
    }
}

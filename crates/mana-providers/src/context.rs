//! Dependencies injected into every provider

use crate::http::HttpClient;
use crate::locale::{LocaleHandle, SpellCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Fetch and build item sets
    pub item_sets_enabled: bool,
    /// Fetch summoner spells
    pub summoner_spells_enabled: bool,
    /// Maximum starter blocks kept in a scraped item set
    pub max_starter_blocks: usize,
    /// League of Graphs champions root
    pub league_of_graphs_url: String,
    /// LoLFlavor champions root
    pub lolflavor_url: String,
}

impl ProviderSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With item sets toggled
    #[inline]
    #[must_use]
    pub fn with_item_sets(mut self, enabled: bool) -> Self {
        self.item_sets_enabled = enabled;
        self
    }

    /// With summoner spells toggled
    #[inline]
    #[must_use]
    pub fn with_summoner_spells(mut self, enabled: bool) -> Self {
        self.summoner_spells_enabled = enabled;
        self
    }

    /// With starter block limit
    #[inline]
    #[must_use]
    pub fn with_max_starter_blocks(mut self, max: usize) -> Self {
        self.max_starter_blocks = max;
        self
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            item_sets_enabled: true,
            summoner_spells_enabled: true,
            max_starter_blocks: 3,
            league_of_graphs_url: "https://www.leagueofgraphs.com/champions".to_string(),
            lolflavor_url: "http://lolflavor.com/champions".to_string(),
        }
    }
}

/// Shared context handed to providers at construction
#[derive(Clone)]
pub struct ProviderContext {
    /// Upstream HTTP client
    pub http: Arc<dyn HttpClient>,
    /// Active display language
    pub locale: LocaleHandle,
    /// Spell display names
    pub spells: Arc<SpellCatalog>,
    /// Feature toggles and endpoints
    pub settings: ProviderSettings,
}

impl ProviderContext {
    /// Create context with English spell names and default settings
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            locale: LocaleHandle::default(),
            spells: Arc::new(SpellCatalog::english()),
            settings: ProviderSettings::default(),
        }
    }

    /// With locale handle
    #[inline]
    #[must_use]
    pub fn with_locale(mut self, locale: LocaleHandle) -> Self {
        self.locale = locale;
        self
    }

    /// With spell catalog
    #[inline]
    #[must_use]
    pub fn with_spells(mut self, spells: SpellCatalog) -> Self {
        self.spells = Arc::new(spells);
        self
    }

    /// With settings
    #[inline]
    #[must_use]
    pub fn with_settings(mut self, settings: ProviderSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("locale", &self.locale.get())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

//! Result cache
//!
//! [`KeyValueStore`] is the raw store seam (JSON values by string key).
//! [`MemoryStore`] keeps entries for the process lifetime in a moka cache.
//! [`ResultCache`] is the typed view the aggregator uses: rune pages under
//! `runes.<key>` and summoner spells under `summonerspells.<key>`.

use async_trait::async_trait;
use mana_schema::{AggregatedResult, RequestKey, RunePage, SummonerSpellPair};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Key-value store holding JSON values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Check if a key is present
    async fn has(&self, key: &str) -> bool;

    /// Value stored under a key
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: Value);
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// In-memory store, unbounded, no expiry
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Cache<String, Value>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Get cache statistics
    ///
    /// Counts are eventually consistent; call
    /// [`MemoryStore::run_pending_tasks`] first for an exact figure.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Apply pending bookkeeping so counts are exact
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Drop every entry
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn has(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    async fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value).await;
    }
}

/// Typed cache of rune pages and summoner spells per request key
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn KeyValueStore>,
}

impl ResultCache {
    /// Wrap a store
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cache over a fresh [`MemoryStore`]
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Cached build for a key
    ///
    /// Only a key with both rune and summoner spell entries counts as a hit;
    /// item sets are never cached, so a hit carries none.
    pub async fn cached_build(&self, key: &RequestKey) -> Option<AggregatedResult> {
        let runes_key = key.runes_key();
        let spells_key = key.summoner_spells_key();
        if !(self.store.has(&runes_key).await && self.store.has(&spells_key).await) {
            return None;
        }

        let runes = self.load(&runes_key).await?;
        let summoner_spells = self.load(&spells_key).await?;
        Some(AggregatedResult {
            runes,
            item_sets: Vec::new(),
            summoner_spells,
        })
    }

    /// Cached rune pages for a key
    pub async fn runes(&self, key: &RequestKey) -> Option<Vec<RunePage>> {
        self.load(&key.runes_key()).await
    }

    /// Cached summoner spells for a key
    pub async fn summoner_spells(&self, key: &RequestKey) -> Option<Vec<SummonerSpellPair>> {
        self.load(&key.summoner_spells_key()).await
    }

    /// Replace the rune pages cached for a key
    pub async fn store_runes(&self, key: &RequestKey, runes: &[RunePage]) {
        self.save(&key.runes_key(), runes).await;
    }

    /// Replace the summoner spells cached for a key
    pub async fn store_summoner_spells(&self, key: &RequestKey, spells: &[SummonerSpellPair]) {
        self.save(&key.summoner_spells_key(), spells).await;
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.get(key).await?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Ignoring unreadable cache entry {}: {}", key, err);
                None
            }
        }
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.store.set(key, json).await,
            Err(err) => warn!("Could not cache {}: {}", key, err),
        }
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").finish_non_exhaustive()
    }
}

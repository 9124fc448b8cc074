//! Testing utilities for the Mana workspace
//!
//! Scripted providers, a shared call log, and build fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use mana_providers::{FetchError, Provider, ProviderError};
use mana_schema::{
    AggregatedResult, Block, BlockLabel, BuildRequest, Capability, CapabilitySet, Champion,
    GameMode, ItemSet, Position, RunePage, SummonerSpellPair,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Ordered record of `(provider id, capability)` calls, shared between fakes
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, Capability)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, provider: &str, capability: Capability) {
        self.calls.lock().push((provider.to_string(), capability));
    }

    pub fn calls(&self) -> Vec<(String, Capability)> {
        self.calls.lock().clone()
    }

    pub fn providers(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

/// Provider returning canned data for the capabilities it declares
#[derive(Debug, Clone)]
pub struct FakeProvider {
    id: String,
    capabilities: CapabilitySet,
    all: AggregatedResult,
    item_sets: Vec<ItemSet>,
    summoner_spells: Vec<SummonerSpellPair>,
    runes: Vec<RunePage>,
    failure: Option<ProviderError>,
    delay: Option<Duration>,
    log: CallLog,
}

impl FakeProvider {
    /// Provider with no capabilities and empty responses
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: CapabilitySet::empty(),
            all: AggregatedResult::new(),
            item_sets: Vec::new(),
            summoner_spells: Vec::new(),
            runes: Vec::new(),
            failure: None,
            delay: None,
            log: CallLog::new(),
        }
    }

    /// Provider declaring every capability and answering `fetch_all`
    pub fn full(id: impl Into<String>, result: AggregatedResult) -> Self {
        Self::new(id)
            .with_capabilities(CapabilitySet::all())
            .with_all(result)
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities = self.capabilities.with(capability);
        self
    }

    pub fn with_all(mut self, result: AggregatedResult) -> Self {
        self.all = result;
        self
    }

    pub fn with_item_sets(mut self, item_sets: Vec<ItemSet>) -> Self {
        self.item_sets = item_sets;
        self
    }

    pub fn with_summoner_spells(mut self, spells: Vec<SummonerSpellPair>) -> Self {
        self.summoner_spells = spells;
        self
    }

    pub fn with_runes(mut self, runes: Vec<RunePage>) -> Self {
        self.runes = runes;
        self
    }

    /// Fail every call with `error`
    pub fn failing(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Fail every call with a transient upstream error
    pub fn failing_transiently(self) -> Self {
        let url = format!("https://{}.test/", self.id);
        self.failing(ProviderError::Fetch(FetchError::Status { url, status: 503 }))
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Share as a trait object
    pub fn shared(self) -> Arc<dyn Provider> {
        Arc::new(self)
    }

    async fn respond<T>(&self, capability: Capability, value: &T) -> Result<T, ProviderError>
    where
        T: Clone + Send + Sync,
    {
        self.log.record(&self.id, capability);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(value.clone()),
        }
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    async fn fetch_all(&self, _request: &BuildRequest) -> Result<AggregatedResult, ProviderError> {
        self.respond(Capability::FetchAll, &self.all).await
    }

    async fn fetch_item_sets(&self, _request: &BuildRequest) -> Result<Vec<ItemSet>, ProviderError> {
        self.respond(Capability::ItemSets, &self.item_sets).await
    }

    async fn fetch_summoner_spells(
        &self,
        _request: &BuildRequest,
    ) -> Result<Vec<SummonerSpellPair>, ProviderError> {
        self.respond(Capability::SummonerSpells, &self.summoner_spells)
            .await
    }

    async fn fetch_runes(&self, _request: &BuildRequest) -> Result<Vec<RunePage>, ProviderError> {
        self.respond(Capability::Runes, &self.runes).await
    }
}

pub fn ahri() -> Champion {
    Champion::new(103, "Ahri", "Ahri")
}

pub fn ahri_mid() -> BuildRequest {
    BuildRequest::new(ahri(), Some(Position::Middle), GameMode::classic())
}

pub fn electrocute_page() -> RunePage {
    RunePage::new(8100, 8300, vec![8112, 8139, 8138, 8105, 8345, 8347, 5008, 5008, 5002])
}

pub fn arcane_comet_page() -> RunePage {
    RunePage::new(8200, 8000, vec![8229, 8226, 8210, 8237, 9111, 8014, 5008, 5008, 5002])
}

pub fn flash_ignite() -> SummonerSpellPair {
    SummonerSpellPair::new(4, 14)
}

pub fn flash_teleport() -> SummonerSpellPair {
    SummonerSpellPair::new(4, 12)
}

pub fn item_set(source: &str) -> ItemSet {
    ItemSet::new("Ahri", Some(Position::Middle), source)
        .with_title(format!("Ahri MIDDLE ({source})"))
        .with_blocks([
            Block::new(BlockLabel::key("item-sets-block-core-build-wr")).with_items([6655, 3020]),
            Block::new(BlockLabel::key("item-sets-block-boots")).with_item(3020),
        ])
}

pub fn result(
    runes: Vec<RunePage>,
    item_sets: Vec<ItemSet>,
    summoner_spells: Vec<SummonerSpellPair>,
) -> AggregatedResult {
    AggregatedResult {
        runes,
        item_sets,
        summoner_spells,
    }
}

//! Provider trait and registry
//!
//! A provider normalizes one upstream source. It declares its
//! [`CapabilitySet`] at construction; capabilities it does not declare are
//! never called.

use crate::context::ProviderContext;
use crate::error::ProviderError;
use crate::league_of_graphs::LeagueOfGraphs;
use crate::lolflavor::LolFlavor;
use async_trait::async_trait;
use mana_schema::{
    AggregatedResult, BuildRequest, Capability, CapabilitySet, ItemSet, RunePage,
    SummonerSpellPair,
};
use std::sync::Arc;

/// Partial result of one capability call
///
/// Carries only the categories the capability is responsible for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution {
    /// Every category
    All(AggregatedResult),
    /// Item sets only
    ItemSets(Vec<ItemSet>),
    /// Summoner spells only
    SummonerSpells(Vec<SummonerSpellPair>),
    /// Rune pages only
    Runes(Vec<RunePage>),
}

impl Contribution {
    /// Capability that produced this contribution
    #[inline]
    #[must_use]
    pub fn capability(&self) -> Capability {
        match self {
            Contribution::All(_) => Capability::FetchAll,
            Contribution::ItemSets(_) => Capability::ItemSets,
            Contribution::SummonerSpells(_) => Capability::SummonerSpells,
            Contribution::Runes(_) => Capability::Runes,
        }
    }

    /// Whether nothing was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Contribution::All(result) => result.is_empty(),
            Contribution::ItemSets(sets) => sets.is_empty(),
            Contribution::SummonerSpells(spells) => spells.is_empty(),
            Contribution::Runes(pages) => pages.is_empty(),
        }
    }
}

/// Normalization adapter for one upstream source
///
/// Implement the capability methods you declare in
/// [`Provider::capabilities`]; the defaults report `Unsupported`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier (`leagueofgraphs`)
    fn id(&self) -> &str;

    /// Display name (`League of Graphs`)
    fn name(&self) -> &str;

    /// Capabilities this provider implements
    fn capabilities(&self) -> CapabilitySet;

    /// Runes, item sets and summoner spells
    async fn fetch_all(&self, request: &BuildRequest) -> Result<AggregatedResult, ProviderError> {
        let _ = request;
        Err(self.unsupported(Capability::FetchAll))
    }

    /// Item sets only
    async fn fetch_item_sets(&self, request: &BuildRequest) -> Result<Vec<ItemSet>, ProviderError> {
        let _ = request;
        Err(self.unsupported(Capability::ItemSets))
    }

    /// Summoner spells only
    async fn fetch_summoner_spells(
        &self,
        request: &BuildRequest,
    ) -> Result<Vec<SummonerSpellPair>, ProviderError> {
        let _ = request;
        Err(self.unsupported(Capability::SummonerSpells))
    }

    /// Rune pages only
    async fn fetch_runes(&self, request: &BuildRequest) -> Result<Vec<RunePage>, ProviderError> {
        let _ = request;
        Err(self.unsupported(Capability::Runes))
    }

    /// Dispatch a capability tag to its method
    ///
    /// # Errors
    /// - `ProviderError::Unsupported` if the tag is not declared
    /// - whatever the capability method returns
    async fn fetch(
        &self,
        capability: Capability,
        request: &BuildRequest,
    ) -> Result<Contribution, ProviderError> {
        if !self.capabilities().contains(capability) {
            return Err(self.unsupported(capability));
        }

        match capability {
            Capability::FetchAll => self.fetch_all(request).await.map(Contribution::All),
            Capability::ItemSets => self.fetch_item_sets(request).await.map(Contribution::ItemSets),
            Capability::SummonerSpells => self
                .fetch_summoner_spells(request)
                .await
                .map(Contribution::SummonerSpells),
            Capability::Runes => self.fetch_runes(request).await.map(Contribution::Runes),
        }
    }

    /// Build the `Unsupported` error for this provider
    fn unsupported(&self, capability: Capability) -> ProviderError {
        ProviderError::Unsupported {
            provider: self.id().to_string(),
            capability,
        }
    }
}

/// Provider ids in default priority order
pub const DEFAULT_PROVIDER_ORDER: [&str; 2] = [LeagueOfGraphs::ID, LolFlavor::ID];

/// Build one provider by id
///
/// # Errors
/// - `ProviderError::UnknownProvider` for an unregistered id
pub fn build_provider(id: &str, ctx: &ProviderContext) -> Result<Arc<dyn Provider>, ProviderError> {
    match id {
        LeagueOfGraphs::ID => Ok(Arc::new(LeagueOfGraphs::new(ctx.clone()))),
        LolFlavor::ID => Ok(Arc::new(LolFlavor::new(ctx.clone()))),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

/// Build providers in the given priority order
///
/// # Errors
/// - `ProviderError::UnknownProvider` for the first unregistered id
pub fn build_providers<S: AsRef<str>>(
    ids: &[S],
    ctx: &ProviderContext,
) -> Result<Vec<Arc<dyn Provider>>, ProviderError> {
    ids.iter().map(|id| build_provider(id.as_ref(), ctx)).collect()
}

/// Providers in default priority order
#[must_use]
pub fn default_providers(ctx: &ProviderContext) -> Vec<Arc<dyn Provider>> {
    vec![
        Arc::new(LeagueOfGraphs::new(ctx.clone())),
        Arc::new(LolFlavor::new(ctx.clone())),
    ]
}

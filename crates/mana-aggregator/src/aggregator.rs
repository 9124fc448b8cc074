//! Ordered-fallback build aggregation
//!
//! Providers are visited in priority order. Each one is asked for the single
//! capability that covers what is still missing, and the loop stops as soon
//! as runes, item sets and summoner spells are all present.

use crate::cache::ResultCache;
use crate::config::AggregatorConfig;
use crate::error::AggregatorError;
use mana_providers::{Contribution, Provider, ProviderError};
use mana_schema::{
    AggregatedResult, BuildRequest, Capability, Champion, GameMode, Position, RequestKey,
    SchemaError,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Capability that fills the most of what is still missing
///
/// `FetchAll` when nothing is known yet, otherwise the first empty category
/// in the order item sets, summoner spells, runes. `None` once complete.
#[must_use]
pub fn next_capability(result: &AggregatedResult) -> Option<Capability> {
    if result.is_empty() {
        Some(Capability::FetchAll)
    } else if result.item_sets.is_empty() {
        Some(Capability::ItemSets)
    } else if result.summoner_spells.is_empty() {
        Some(Capability::SummonerSpells)
    } else if result.runes.is_empty() {
        Some(Capability::Runes)
    } else {
        None
    }
}

/// Which cached categories a merge changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Rune pages were appended
    pub runes_added: bool,
    /// Item sets were appended
    pub item_sets_added: bool,
    /// Summoner spells were accepted
    pub summoner_spells_accepted: bool,
}

/// Merge one contribution into the working result
///
/// Rune pages and item sets are appended. Summoner spells are taken only
/// while none have been accepted yet.
pub fn merge_contribution(result: &mut AggregatedResult, contribution: Contribution) -> MergeOutcome {
    let (runes, item_sets, summoner_spells) = match contribution {
        Contribution::All(all) => (all.runes, all.item_sets, all.summoner_spells),
        Contribution::ItemSets(sets) => (Vec::new(), sets, Vec::new()),
        Contribution::SummonerSpells(spells) => (Vec::new(), Vec::new(), spells),
        Contribution::Runes(pages) => (pages, Vec::new(), Vec::new()),
    };

    let mut outcome = MergeOutcome::default();
    if !runes.is_empty() {
        result.runes.extend(runes);
        outcome.runes_added = true;
    }
    if !item_sets.is_empty() {
        result.item_sets.extend(item_sets);
        outcome.item_sets_added = true;
    }
    if result.summoner_spells.is_empty() && !summoner_spells.is_empty() {
        result.summoner_spells = summoner_spells;
        outcome.summoner_spells_accepted = true;
    }
    outcome
}

/// What happened when a provider was visited
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// Selected capability not declared; provider not called
    Skipped,
    /// Call returned; the contribution may still be empty
    Contributed {
        /// Whether the contribution carried no data
        empty: bool,
    },
    /// Call returned an error
    Failed(ProviderError),
    /// Call did not finish within the provider timeout
    TimedOut,
}

/// One provider visit during a resolution
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    /// Provider id
    pub provider: String,
    /// Capability selected for this provider
    pub capability: Capability,
    /// Result of the visit
    pub outcome: AttemptOutcome,
}

impl ProviderAttempt {
    /// Check if the provider was actually called
    #[inline]
    #[must_use]
    pub fn was_called(&self) -> bool {
        !matches!(self.outcome, AttemptOutcome::Skipped)
    }
}

/// Resolution with diagnostics
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Merged build
    pub result: AggregatedResult,
    /// Served entirely from the result cache
    pub from_cache: bool,
    /// Provider visits, in order
    pub attempts: Vec<ProviderAttempt>,
}

impl Resolution {
    /// Number of providers actually called
    #[must_use]
    pub fn calls(&self) -> usize {
        self.attempts.iter().filter(|a| a.was_called()).count()
    }
}

/// Build aggregator over an ordered provider list
pub struct BuildAggregator {
    providers: Vec<Arc<dyn Provider>>,
    cache: ResultCache,
    config: AggregatorConfig,
}

impl BuildAggregator {
    /// Create new aggregator; `providers` is the priority order
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn Provider>>,
        cache: ResultCache,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            providers,
            cache,
            config,
        }
    }

    /// Providers in priority order
    #[inline]
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Result cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Resolve the build for a champion
    ///
    /// Never fails for missing data: a partial or empty result is returned
    /// when providers have nothing.
    ///
    /// # Errors
    /// - `AggregatorError::InvalidChampion` if the champion record is invalid
    pub async fn resolve(
        &self,
        champion: &Champion,
        position: Option<Position>,
        game_mode: &GameMode,
    ) -> Result<AggregatedResult, AggregatorError> {
        let request = BuildRequest::new(champion.clone(), position, game_mode.clone());
        Ok(self.resolve_detailed(&request).await?.result)
    }

    /// Resolve from the game client's raw position and mode strings
    ///
    /// # Errors
    /// - `AggregatorError::Schema` for an unknown position or a blank mode
    /// - `AggregatorError::InvalidChampion` if the champion record is invalid
    pub async fn resolve_from_client(
        &self,
        champion: &Champion,
        assigned_position: &str,
        game_mode: &str,
    ) -> Result<AggregatedResult, AggregatorError> {
        let position = Position::from_assigned(assigned_position)?;
        let game_mode = GameMode::new(game_mode)?;
        self.resolve(champion, position, &game_mode).await
    }

    /// Resolve and report every provider visit
    ///
    /// # Errors
    /// - `AggregatorError::InvalidChampion` if the champion record is invalid
    /// - `AggregatorError::Schema` if the game mode is blank
    pub async fn resolve_detailed(
        &self,
        request: &BuildRequest,
    ) -> Result<Resolution, AggregatorError> {
        request.validate().map_err(|e| match e {
            SchemaError::InvalidChampion(reason) => AggregatorError::InvalidChampion(reason),
            other => AggregatorError::Schema(other),
        })?;

        let key = request.key();
        if let Some(result) = self.cache.cached_build(&key).await {
            info!("Serving {} ({}) from cache", request.champion.name, key);
            return Ok(Resolution {
                result,
                from_cache: true,
                attempts: Vec::new(),
            });
        }

        let mut result = AggregatedResult::new();
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let Some(capability) = next_capability(&result) else {
                break;
            };

            if !provider.capabilities().contains(capability) {
                debug!("[{}] Skipping, {} not supported", provider.name(), capability);
                attempts.push(ProviderAttempt {
                    provider: provider.id().to_string(),
                    capability,
                    outcome: AttemptOutcome::Skipped,
                });
                continue;
            }

            let outcome = self.visit(provider.as_ref(), capability, request, &key, &mut result).await;
            attempts.push(ProviderAttempt {
                provider: provider.id().to_string(),
                capability,
                outcome,
            });

            if result.is_complete() {
                debug!("Build for {} complete after {}", key, provider.name());
                break;
            }
        }

        if !result.is_complete() {
            let missing: Vec<String> = result.missing().iter().map(ToString::to_string).collect();
            info!("Providers exhausted for {}, missing: {}", key, missing.join(", "));
        }

        Ok(Resolution {
            result,
            from_cache: false,
            attempts,
        })
    }

    /// Call one provider under the timeout and merge what it returns
    async fn visit(
        &self,
        provider: &dyn Provider,
        capability: Capability,
        request: &BuildRequest,
        key: &RequestKey,
        result: &mut AggregatedResult,
    ) -> AttemptOutcome {
        info!("[{}] {} for {}", provider.name(), capability, key);

        match timeout(self.config.provider_timeout(), provider.fetch(capability, request)).await {
            Ok(Ok(contribution)) => {
                let empty = contribution.is_empty();
                let merged = merge_contribution(result, contribution);
                if merged.runes_added {
                    self.cache.store_runes(key, &result.runes).await;
                }
                if merged.summoner_spells_accepted {
                    self.cache
                        .store_summoner_spells(key, &result.summoner_spells)
                        .await;
                }
                AttemptOutcome::Contributed { empty }
            }
            Ok(Err(err)) => {
                let kind = if err.is_transient() { "transient" } else { "permanent" };
                warn!("[{}] {} failed ({}): {}", provider.name(), capability, kind, err);
                AttemptOutcome::Failed(err)
            }
            Err(_) => {
                warn!(
                    "[{}] {} timed out after {:?}",
                    provider.name(),
                    capability,
                    self.config.provider_timeout()
                );
                AttemptOutcome::TimedOut
            }
        }
    }
}

impl std::fmt::Debug for BuildAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.providers.iter().map(|p| p.id()).collect();
        f.debug_struct("BuildAggregator")
            .field("providers", &ids)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

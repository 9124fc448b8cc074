//! League of Graphs provider
//!
//! Scrapes four HTML pages per champion/position (runes, items, spells,
//! skill orders) and implements every capability.

mod parse;

use crate::context::ProviderContext;
use crate::error::ProviderError;
use crate::http::get_optional;
use crate::provider::Provider;
use async_trait::async_trait;
use mana_schema::{
    AggregatedResult, BuildRequest, CapabilitySet, ItemSet, RunePage, SummonerSpellPair,
};
use tracing::{debug, info, warn};

/// Page kinds served under the champions root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Runes,
    Items,
    Spells,
    SkillOrders,
}

impl Page {
    fn segment(self) -> &'static str {
        match self {
            Page::Runes => "runes",
            Page::Items => "items",
            Page::Spells => "spells",
            Page::SkillOrders => "skills-orders",
        }
    }
}

/// League of Graphs scraper
#[derive(Debug, Clone)]
pub struct LeagueOfGraphs {
    ctx: ProviderContext,
}

impl LeagueOfGraphs {
    /// Provider id
    pub const ID: &'static str = "leagueofgraphs";

    /// Display name
    pub const NAME: &'static str = "League of Graphs";

    /// Create new provider
    #[must_use]
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn page_url(&self, page: Page, request: &BuildRequest) -> String {
        let mut url = format!(
            "{}/{}/{}",
            self.ctx.settings.league_of_graphs_url.trim_end_matches('/'),
            page.segment(),
            request.champion.key
        );
        if let Some(position) = request.position {
            url.push('/');
            url.push_str(position.as_str());
        }
        url.to_lowercase()
    }

    /// Fetch one page; `None` when upstream has nothing for the request
    async fn fetch_page(
        &self,
        page: Page,
        request: &BuildRequest,
    ) -> Result<Option<String>, ProviderError> {
        let url = self.page_url(page, request);
        Ok(get_optional(self.ctx.http.as_ref(), &url).await?)
    }

    /// Fetch a page only when `enabled`
    async fn fetch_page_if(
        &self,
        enabled: bool,
        page: Page,
        request: &BuildRequest,
    ) -> Result<Option<String>, ProviderError> {
        if enabled {
            self.fetch_page(page, request).await
        } else {
            Ok(None)
        }
    }

    /// Skill orders only decorate starter labels; failures leave them out
    async fn fetch_skill_orders(&self, enabled: bool, request: &BuildRequest) -> Option<String> {
        match self.fetch_page_if(enabled, Page::SkillOrders, request).await {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    "[{}] Skill orders unavailable for {}: {}",
                    Self::NAME,
                    request.key(),
                    err
                );
                None
            }
        }
    }

    fn spells_allowed(&self) -> bool {
        if !self.ctx.settings.summoner_spells_enabled {
            return false;
        }
        let locale = self.ctx.locale.get();
        if !locale.is_english() || !self.ctx.spells.supports(&locale) {
            info!(
                "[{}] Summoner spells are not available in {}",
                Self::NAME,
                locale
            );
            return false;
        }
        true
    }

    fn runes_from(page: Option<&str>) -> Vec<RunePage> {
        page.map_or_else(Vec::new, |html| absorb(parse::parse_rune_pages(html)))
    }

    fn spells_from(&self, page: Option<&str>) -> Vec<SummonerSpellPair> {
        let Some(html) = page else {
            return Vec::new();
        };
        absorb(parse::parse_summoner_spells(
            html,
            &self.ctx.spells,
            &self.ctx.locale.get(),
        ))
    }

    fn item_sets_from(
        &self,
        request: &BuildRequest,
        items: Option<&str>,
        skills: Option<&str>,
    ) -> Vec<ItemSet> {
        let Some(html) = items else {
            return Vec::new();
        };
        let skill_order = skills.and_then(parse::parse_skill_order);
        absorb(
            parse::build_item_set(
                html,
                request,
                skill_order.as_deref(),
                self.ctx.settings.max_starter_blocks,
            )
            .map(|set| vec![set]),
        )
    }
}

/// Log a malformed page and fall back to an empty category
fn absorb<T>(parsed: Result<Vec<T>, ProviderError>) -> Vec<T> {
    match parsed {
        Ok(values) => values,
        Err(err) => {
            warn!("[{}] {}", LeagueOfGraphs::NAME, err);
            Vec::new()
        }
    }
}

#[async_trait]
impl Provider for LeagueOfGraphs {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::all()
    }

    async fn fetch_all(&self, request: &BuildRequest) -> Result<AggregatedResult, ProviderError> {
        let items_enabled = self.ctx.settings.item_sets_enabled;
        let spells_enabled = self.spells_allowed();
        debug!(
            "[{}] Gathering data for {} (items: {}, spells: {})",
            Self::NAME,
            request.key(),
            items_enabled,
            spells_enabled
        );

        let (runes, items, spells, skills) = tokio::join!(
            self.fetch_page(Page::Runes, request),
            self.fetch_page_if(items_enabled, Page::Items, request),
            self.fetch_page_if(spells_enabled, Page::Spells, request),
            self.fetch_skill_orders(items_enabled, request),
        );
        let (runes, items, spells) = (runes?, items?, spells?);

        Ok(AggregatedResult {
            runes: Self::runes_from(runes.as_deref()),
            item_sets: self.item_sets_from(request, items.as_deref(), skills.as_deref()),
            summoner_spells: self.spells_from(spells.as_deref()),
        })
    }

    async fn fetch_item_sets(&self, request: &BuildRequest) -> Result<Vec<ItemSet>, ProviderError> {
        if !self.ctx.settings.item_sets_enabled {
            return Ok(Vec::new());
        }

        let (items, skills) = tokio::join!(
            self.fetch_page(Page::Items, request),
            self.fetch_skill_orders(true, request),
        );
        Ok(self.item_sets_from(request, items?.as_deref(), skills.as_deref()))
    }

    async fn fetch_summoner_spells(
        &self,
        request: &BuildRequest,
    ) -> Result<Vec<SummonerSpellPair>, ProviderError> {
        if !self.spells_allowed() {
            return Ok(Vec::new());
        }

        let page = self.fetch_page(Page::Spells, request).await?;
        Ok(self.spells_from(page.as_deref()))
    }

    async fn fetch_runes(&self, request: &BuildRequest) -> Result<Vec<RunePage>, ProviderError> {
        let page = self.fetch_page(Page::Runes, request).await?;
        Ok(Self::runes_from(page.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::parse::fixtures;
    use super::*;
    use crate::context::ProviderSettings;
    use crate::error::FetchError;
    use crate::http::MockHttpClient;
    use crate::locale::{Locale, LocaleHandle};
    use mana_schema::{Capability, Champion, GameMode, Position};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn request(position: Option<Position>, mode: GameMode) -> BuildRequest {
        BuildRequest::new(Champion::new(103, "Ahri", "Ahri"), position, mode)
    }

    /// Serves fixture pages by URL segment
    fn fixture_client() -> MockHttpClient {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            if url.contains("/runes/") {
                Ok(fixtures::RUNES_PAGE.to_string())
            } else if url.contains("/items/") {
                Ok(fixtures::ITEMS_PAGE.to_string())
            } else if url.contains("/spells/") {
                Ok(fixtures::SPELLS_PAGE.to_string())
            } else if url.contains("/skills-orders/") {
                Ok(fixtures::skills_page())
            } else {
                Err(FetchError::NotFound {
                    url: url.to_string(),
                })
            }
        });
        client
    }

    fn provider(client: MockHttpClient) -> LeagueOfGraphs {
        LeagueOfGraphs::new(ProviderContext::new(Arc::new(client)))
    }

    #[test]
    fn page_urls_are_lower_case() {
        let log = provider(MockHttpClient::new());
        assert_eq!(
            log.page_url(Page::Runes, &request(Some(Position::Middle), GameMode::classic())),
            "https://www.leagueofgraphs.com/champions/runes/ahri/middle"
        );
        assert_eq!(
            log.page_url(Page::SkillOrders, &request(None, GameMode::aram())),
            "https://www.leagueofgraphs.com/champions/skills-orders/ahri"
        );
    }

    #[tokio::test]
    async fn fetch_all_normalizes_every_category() {
        let log = provider(fixture_client());
        let result = log
            .fetch_all(&request(Some(Position::Middle), GameMode::classic()))
            .await
            .unwrap();

        assert_eq!(result.runes.len(), 2);
        assert_eq!(result.item_sets.len(), 1);
        assert_eq!(result.item_sets[0].title, "LOG Ahri - MIDDLE");
        assert_eq!(
            result.summoner_spells,
            vec![SummonerSpellPair::new(4, 14), SummonerSpellPair::new(4, 12)]
        );
    }

    #[tokio::test]
    async fn fetch_all_skips_disabled_pages() {
        let mut client = MockHttpClient::new();
        client
            .expect_get_text()
            .withf(|url| url.contains("/runes/"))
            .times(1)
            .returning(|_| Ok(fixtures::RUNES_PAGE.to_string()));

        let settings = ProviderSettings::new()
            .with_item_sets(false)
            .with_summoner_spells(false);
        let log = LeagueOfGraphs::new(ProviderContext::new(Arc::new(client)).with_settings(settings));

        let result = log
            .fetch_all(&request(Some(Position::Middle), GameMode::classic()))
            .await
            .unwrap();
        assert_eq!(result.runes.len(), 2);
        assert!(result.item_sets.is_empty());
        assert!(result.summoner_spells.is_empty());
    }

    #[tokio::test]
    async fn summoner_spells_are_gated_by_locale() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().never();

        let ctx = ProviderContext::new(Arc::new(client))
            .with_locale(LocaleHandle::new(Locale::new("fr_FR")));
        let log = LeagueOfGraphs::new(ctx);

        let spells = log
            .fetch_summoner_spells(&request(Some(Position::Top), GameMode::classic()))
            .await
            .unwrap();
        assert!(spells.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_empty() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            Err(FetchError::NotFound {
                url: url.to_string(),
            })
        });

        let result = provider(client)
            .fetch_all(&request(Some(Position::Jungle), GameMode::classic()))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn malformed_page_is_empty() {
        let mut client = MockHttpClient::new();
        client
            .expect_get_text()
            .returning(|_| Ok("<html><body>Maintenance</body></html>".to_string()));

        let runes = provider(client)
            .fetch_runes(&request(Some(Position::Middle), GameMode::classic()))
            .await
            .unwrap();
        assert!(runes.is_empty());
    }

    #[tokio::test]
    async fn server_errors_propagate() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        });

        let result = provider(client)
            .fetch_item_sets(&request(Some(Position::Middle), GameMode::classic()))
            .await;
        assert!(matches!(
            result,
            Err(ProviderError::Fetch(FetchError::Status { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn failed_skill_orders_keep_other_categories() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            if url.contains("/skills-orders/") {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                })
            } else if url.contains("/runes/") {
                Ok(fixtures::RUNES_PAGE.to_string())
            } else if url.contains("/items/") {
                Ok(fixtures::ITEMS_PAGE.to_string())
            } else {
                Ok(fixtures::SPELLS_PAGE.to_string())
            }
        });
        let log = provider(client);
        let request = request(Some(Position::Middle), GameMode::classic());

        let result = log.fetch_all(&request).await.unwrap();
        assert_eq!(result.runes.len(), 2);
        assert_eq!(result.item_sets.len(), 1);
        assert_eq!(result.summoner_spells.len(), 2);

        let item_sets = log.fetch_item_sets(&request).await.unwrap();
        assert_eq!(item_sets.len(), 1);
        assert!(!item_sets[0].blocks[0].label.to_string().contains("=>"));
    }

    #[tokio::test]
    async fn dispatch_through_capability_tag() {
        let contribution = provider(fixture_client())
            .fetch(
                Capability::Runes,
                &request(Some(Position::Middle), GameMode::classic()),
            )
            .await
            .unwrap();
        assert_eq!(contribution.capability(), Capability::Runes);
        assert!(!contribution.is_empty());
    }
}

//! LoLFlavor provider
//!
//! Serves ready-made item sets as JSON, one file per champion and lane.
//! Only implements [`Capability::ItemSets`].

use crate::context::ProviderContext;
use crate::error::ProviderError;
use crate::http::get_optional;
use crate::provider::Provider;
use async_trait::async_trait;
use mana_schema::{Block, BlockLabel, BuildRequest, Capability, CapabilitySet, ItemSet, Position};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// LoLFlavor item set source
#[derive(Debug, Clone)]
pub struct LolFlavor {
    ctx: ProviderContext,
}

#[derive(Debug, Deserialize)]
struct RawItemSet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    label: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(deserialize_with = "number_or_string")]
    id: u32,
    #[serde(default = "default_count", deserialize_with = "number_or_string")]
    count: u32,
}

fn default_count() -> u32 {
    1
}

/// Ids and counts are sometimes quoted
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Upstream file dimension: `aram`, or the lane with `middle` shortened
fn dimension(request: &BuildRequest) -> Option<String> {
    if request.game_mode.is_aram() {
        return Some("aram".to_string());
    }
    request.position.map(|position| match position {
        Position::Middle => "mid".to_string(),
        other => other.as_str().to_lowercase(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl LolFlavor {
    /// Provider id
    pub const ID: &'static str = "lolflavor";

    /// Display name
    pub const NAME: &'static str = "LoLFlavor";

    /// Create new provider
    #[must_use]
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn file_url(&self, key: &str, dimension: &str) -> String {
        format!(
            "{}/{key}/Recommended/{key}_{dimension}_scrape.json",
            self.ctx.settings.lolflavor_url.trim_end_matches('/')
        )
    }

    fn normalize(raw: RawItemSet, request: &BuildRequest, dimension: &str) -> ItemSet {
        let updated = raw.title.split(" - ").nth(1).map(str::trim);

        let blocks = raw.blocks.into_iter().enumerate().map(|(index, block)| {
            let label = match (index, updated) {
                (0, Some(date)) => BlockLabel::key_with_args(
                    "item-sets-block-consumables-updated",
                    vec![date.to_string()],
                ),
                (0, None) => BlockLabel::key("item-sets-block-consumables"),
                _ => BlockLabel::Text(block.label),
            };
            let mut normalized = Block::new(label);
            for item in block.items {
                normalized.push_item(item.id, item.count, false);
            }
            normalized
        });

        let label = if request.game_mode.is_aram() {
            "ARAM".to_string()
        } else {
            capitalize(dimension)
        };

        ItemSet::new(&request.champion.key, request.position, Self::ID)
            .with_title(format!("{} {} (LoLFlavor)", request.champion.name, label))
            .with_blocks(blocks)
    }
}

#[async_trait]
impl Provider for LolFlavor {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty().with(Capability::ItemSets)
    }

    async fn fetch_item_sets(&self, request: &BuildRequest) -> Result<Vec<ItemSet>, ProviderError> {
        if !self.ctx.settings.item_sets_enabled {
            return Ok(Vec::new());
        }
        let Some(dimension) = dimension(request) else {
            tracing::debug!("[{}] No position for {}, nothing to fetch", Self::NAME, request.key());
            return Ok(Vec::new());
        };

        let url = self.file_url(&request.champion.key, &dimension);
        let Some(body) = get_optional(self.ctx.http.as_ref(), &url).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<RawItemSet>(&body) {
            Ok(raw) => Ok(vec![Self::normalize(raw, request, &dimension)]),
            Err(err) => {
                warn!(
                    "[{}] {}",
                    Self::NAME,
                    ProviderError::malformed(Self::ID, "item sets", err.to_string())
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::http::MockHttpClient;
    use mana_schema::{Champion, GameMode};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const SCRAPE: &str = r#"{
        "title": "Ahri Mid - 2020-01-14",
        "type": "custom",
        "map": "any",
        "blocks": [
            { "type": "Consumables", "items": [{ "id": "2003", "count": "2" }, { "id": 2031, "count": 1 }] },
            { "type": "Core Items", "items": [{ "id": "6655" }, { "id": 3020, "count": 1 }] }
        ]
    }"#;

    fn request(position: Option<Position>, mode: GameMode) -> BuildRequest {
        BuildRequest::new(Champion::new(103, "Ahri", "Ahri"), position, mode)
    }

    fn serving(expected_url: &'static str, body: &'static str) -> LolFlavor {
        let mut client = MockHttpClient::new();
        client
            .expect_get_text()
            .withf(move |url| url == expected_url)
            .times(1)
            .returning(move |_| Ok(body.to_string()));
        LolFlavor::new(ProviderContext::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn retitles_and_relabels() {
        let provider = serving(
            "http://lolflavor.com/champions/Ahri/Recommended/Ahri_mid_scrape.json",
            SCRAPE,
        );
        let sets = provider
            .fetch_item_sets(&request(Some(Position::Middle), GameMode::classic()))
            .await
            .unwrap();

        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.title, "Ahri Mid (LoLFlavor)");
        assert_eq!(set.source_id, "lolflavor");
        assert_eq!(
            set.blocks[0].label,
            BlockLabel::key_with_args("item-sets-block-consumables-updated", vec!["2020-01-14".to_string()])
        );
        assert_eq!(set.blocks[0].items[0].id, 2003);
        assert_eq!(set.blocks[0].items[0].count, 2);
        assert_eq!(set.blocks[1].label, BlockLabel::Text("Core Items".to_string()));
        assert_eq!(set.blocks[1].items[0].count, 1);
    }

    #[tokio::test]
    async fn aram_uses_mode_file() {
        let provider = serving(
            "http://lolflavor.com/champions/Ahri/Recommended/Ahri_aram_scrape.json",
            SCRAPE,
        );
        let sets = provider
            .fetch_item_sets(&request(None, GameMode::aram()))
            .await
            .unwrap();
        assert_eq!(sets[0].title, "Ahri ARAM (LoLFlavor)");
    }

    #[tokio::test]
    async fn missing_position_is_empty() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().never();
        let provider = LolFlavor::new(ProviderContext::new(Arc::new(client)));

        let sets = provider
            .fetch_item_sets(&request(None, GameMode::classic()))
            .await
            .unwrap();
        assert!(sets.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_empty() {
        let mut client = MockHttpClient::new();
        client.expect_get_text().returning(|url| {
            Err(FetchError::NotFound {
                url: url.to_string(),
            })
        });
        let provider = LolFlavor::new(ProviderContext::new(Arc::new(client)));

        let sets = provider
            .fetch_item_sets(&request(Some(Position::Support), GameMode::classic()))
            .await
            .unwrap();
        assert!(sets.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_empty() {
        let provider = serving(
            "http://lolflavor.com/champions/Ahri/Recommended/Ahri_top_scrape.json",
            "<html>moved</html>",
        );
        let sets = provider
            .fetch_item_sets(&request(Some(Position::Top), GameMode::classic()))
            .await
            .unwrap();
        assert!(sets.is_empty());
    }

    #[tokio::test]
    async fn only_item_sets_are_declared() {
        let provider = LolFlavor::new(ProviderContext::new(Arc::new(MockHttpClient::new())));
        let result = provider
            .fetch(Capability::Runes, &request(Some(Position::Top), GameMode::classic()))
            .await;
        assert!(matches!(result, Err(ProviderError::Unsupported { .. })));
    }

    #[test]
    fn capitalizes_dimension() {
        assert_eq!(capitalize("adc"), "Adc");
        assert_eq!(capitalize(""), "");
    }
}

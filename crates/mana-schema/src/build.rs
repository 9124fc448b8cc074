//! Build data: rune pages, item sets and summoner spells
//!
//! [`AggregatedResult`] is both the shape providers fill and the shape the
//! aggregator returns. All three categories are always present as lists.

use crate::champion::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One rune page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunePage {
    /// Primary rune path
    pub primary_style_id: u32,
    /// Secondary rune path
    pub sub_style_id: u32,
    /// Chosen perks, one per slot, in slot order
    pub selected_perk_ids: Vec<u32>,
}

impl RunePage {
    /// Create new rune page
    #[inline]
    #[must_use]
    pub fn new(primary_style_id: u32, sub_style_id: u32, selected_perk_ids: Vec<u32>) -> Self {
        Self {
            primary_style_id,
            sub_style_id,
            selected_perk_ids,
        }
    }
}

/// Ordered pair of summoner spell ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonerSpellPair(pub u32, pub u32);

impl SummonerSpellPair {
    /// Create new pair
    #[inline]
    #[must_use]
    pub fn new(first: u32, second: u32) -> Self {
        Self(first, second)
    }
}

/// Localizable block label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockLabel {
    /// Translation key with positional arguments
    Translated {
        /// Translation key (e.g. `item-sets-block-boots`)
        key: String,
        /// Positional arguments
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
    /// Literal text, already in display form
    Text(String),
}

impl BlockLabel {
    /// Translation key without arguments
    #[inline]
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Translated {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Translation key with arguments
    #[inline]
    #[must_use]
    pub fn key_with_args(key: impl Into<String>, args: Vec<String>) -> Self {
        Self::Translated {
            key: key.into(),
            args,
        }
    }
}

impl fmt::Display for BlockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockLabel::Translated { key, args } if args.is_empty() => f.write_str(key),
            BlockLabel::Translated { key, args } => write!(f, "{key}({})", args.join(", ")),
            BlockLabel::Text(text) => f.write_str(text),
        }
    }
}

/// Item inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockItem {
    /// Item id
    pub id: u32,
    /// Stack count
    pub count: u32,
    /// Only show once the item is a finished purchase
    #[serde(default)]
    pub final_only: bool,
}

/// Titled group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Label shown above the block
    #[serde(rename = "type")]
    pub label: BlockLabel,
    /// Items, in display order
    pub items: Vec<BlockItem>,
}

impl Block {
    /// Create empty block
    #[inline]
    #[must_use]
    pub fn new(label: BlockLabel) -> Self {
        Self {
            label,
            items: Vec::new(),
        }
    }

    /// Append a single item
    #[inline]
    #[must_use]
    pub fn with_item(mut self, id: u32) -> Self {
        self.push_item(id, 1, false);
        self
    }

    /// Append several single items
    #[must_use]
    pub fn with_items(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        for id in ids {
            self.push_item(id, 1, false);
        }
        self
    }

    /// Append an item with explicit count and flag
    pub fn push_item(&mut self, id: u32, count: u32, final_only: bool) {
        self.items.push(BlockItem {
            id,
            count,
            final_only,
        });
    }

    /// Whether the block has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Item set for one champion, normalized from one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSet {
    /// Champion key
    pub champion_key: String,
    /// Lane the set was built for
    pub position: Option<Position>,
    /// Provider id that produced the set
    pub source_id: String,
    /// Display title
    pub title: String,
    /// Blocks, in display order
    pub blocks: Vec<Block>,
}

impl ItemSet {
    /// Create untitled, empty item set
    #[inline]
    #[must_use]
    pub fn new(
        champion_key: impl Into<String>,
        position: Option<Position>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            champion_key: champion_key.into(),
            position,
            source_id: source_id.into(),
            title: String::new(),
            blocks: Vec::new(),
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With blocks appended
    #[inline]
    #[must_use]
    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks.extend(blocks);
        self
    }

    /// Append a block
    #[inline]
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// The three data kinds tracked per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Rune pages
    Runes,
    /// Item sets
    ItemSets,
    /// Summoner spells
    SummonerSpells,
}

impl Category {
    /// All categories
    pub const ALL: [Category; 3] = [Category::Runes, Category::ItemSets, Category::SummonerSpells];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Runes => "runes",
            Category::ItemSets => "item sets",
            Category::SummonerSpells => "summoner spells",
        })
    }
}

/// Merged build for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    /// Rune pages from every contributing provider
    #[serde(default)]
    pub runes: Vec<RunePage>,
    /// Item sets from every contributing provider
    #[serde(default)]
    pub item_sets: Vec<ItemSet>,
    /// Summoner spell pairs from the first provider that had any
    #[serde(default)]
    pub summoner_spells: Vec<SummonerSpellPair>,
}

impl AggregatedResult {
    /// Create empty result
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a category has no data
    #[inline]
    #[must_use]
    pub fn is_missing(&self, category: Category) -> bool {
        match category {
            Category::Runes => self.runes.is_empty(),
            Category::ItemSets => self.item_sets.is_empty(),
            Category::SummonerSpells => self.summoner_spells.is_empty(),
        }
    }

    /// Categories with no data
    #[must_use]
    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_missing(*c))
            .collect()
    }

    /// Whether every category has data
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| !self.is_missing(*c))
    }

    /// Whether no category has data
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.is_missing(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aggregated_result_missing_categories() {
        let mut result = AggregatedResult::new();
        assert!(result.is_empty());
        assert_eq!(result.missing(), Category::ALL.to_vec());

        result.runes.push(RunePage::new(8100, 8300, vec![8112]));
        assert_eq!(
            result.missing(),
            vec![Category::ItemSets, Category::SummonerSpells]
        );
        assert!(!result.is_complete());

        result.item_sets.push(ItemSet::new("Ahri", None, "test"));
        result.summoner_spells.push(SummonerSpellPair::new(4, 14));
        assert!(result.is_complete());
    }

    #[test]
    fn aggregated_result_serializes_camel_case() {
        let json = serde_json::to_value(AggregatedResult::new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "runes": [], "itemSets": [], "summonerSpells": [] })
        );
    }

    #[test]
    fn block_builder() {
        let block = Block::new(BlockLabel::key("item-sets-block-trinkets"))
            .with_item(3340)
            .with_items([3363, 3364]);
        assert_eq!(block.items.len(), 3);
        assert_eq!(block.items[0].count, 1);
        assert!(!block.items[0].final_only);
    }

    #[test]
    fn block_label_display() {
        assert_eq!(BlockLabel::key("boots").to_string(), "boots");
        assert_eq!(
            BlockLabel::key_with_args("starter", vec!["1".into(), "52%".into()]).to_string(),
            "starter(1, 52%)"
        );
        assert_eq!(BlockLabel::Text("Consumables".into()).to_string(), "Consumables");
    }

    #[test]
    fn item_set_builder() {
        let set = ItemSet::new("Ahri", Some(Position::Middle), "leagueofgraphs")
            .with_title("LOG Ahri - MIDDLE")
            .with_blocks([Block::new(BlockLabel::key("boots")).with_item(3020)]);
        assert_eq!(set.title, "LOG Ahri - MIDDLE");
        assert_eq!(set.blocks.len(), 1);
    }
}

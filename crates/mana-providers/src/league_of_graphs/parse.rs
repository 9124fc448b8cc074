//! League of Graphs page normalization
//!
//! Each function takes one page body and produces schema types, or a
//! `Malformed` error when the page does not look like what we expect.

use crate::error::ProviderError;
use crate::locale::{Locale, SpellCatalog};
use crate::markup;
use mana_schema::{Block, BlockLabel, BuildRequest, ItemSet, RunePage, SummonerSpellPair};
use once_cell::sync::Lazy;
use regex::Regex;

use super::LeagueOfGraphs;

const PERK_CDN: &str = "//cdn.leagueofgraphs.com/img/perks/";

/// Rows holding stat shards; they only count when every option is lit
const SHARD_ROWS: std::ops::Range<usize> = 5..7;

/// Skill grid: 3 basic skills x 18 levels
const SKILL_CELLS: usize = 54;
const SKILL_KEYS: [&str; 3] = ["Q", "W", "E"];

/// Starter rows carry several `.percentage` cells; the sixth is the win rate
const WIN_RATE_CELL: usize = 5;

const TRINKETS: [u32; 5] = [2055, 3340, 3341, 3348, 3363];
const CONSUMABLES: [u32; 4] = [2003, 2138, 2139, 2140];

/// Blocks built from the tables following the starters, in table order
const FOLLOWING_BLOCKS: [&str; 3] = [
    "item-sets-block-core-build-wr",
    "item-sets-block-endgame",
    "item-sets-block-boots",
];

static PERK_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})\.png").expect("perk id regex"));
static ITEM_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bitems?-?(\d{4,6})\b").expect("item id regex"));

fn malformed(what: &'static str, message: impl Into<String>) -> ProviderError {
    ProviderError::malformed(LeagueOfGraphs::ID, what, message)
}

/// `(perk id, opacity)` of every perk image in a row
fn perk_images(row: &str) -> Vec<(u32, f32)> {
    markup::images(row)
        .into_iter()
        .filter_map(|img| {
            let src = markup::attr(img, "src")?;
            if !src.starts_with(PERK_CDN) {
                return None;
            }
            let id = PERK_ID_RE.captures(src)?.get(1)?.as_str().parse().ok()?;
            Some((id, markup::opacity(img)))
        })
        .collect()
}

fn parse_rune_table(table: &str) -> Option<RunePage> {
    let mut primary = None;
    let mut sub = None;
    let mut perks = Vec::new();

    for (index, row) in markup::rows(table).into_iter().enumerate() {
        let mut images = perk_images(row);

        if index == 0 {
            let mut styles = images.into_iter().map(|(id, _)| id);
            primary = styles.next();
            sub = styles.next();
            continue;
        }

        // The chosen option is the most opaque one
        images.sort_by(|a, b| a.1.total_cmp(&b.1));
        let Some(&(chosen, _)) = images.last() else {
            continue;
        };

        if SHARD_ROWS.contains(&index) && !images.iter().all(|(_, opacity)| *opacity > 0.5) {
            continue;
        }
        perks.push(chosen);
    }

    if perks.is_empty() {
        return None;
    }
    Some(RunePage::new(primary?, sub?, perks))
}

/// Rune pages from the runes page, one per table (at most two)
///
/// # Errors
/// - `Malformed` if no table yields a complete page
pub(crate) fn parse_rune_pages(html: &str) -> Result<Vec<RunePage>, ProviderError> {
    let tables = markup::tables(html);
    if tables.is_empty() {
        return Err(malformed("runes", "no rune tables"));
    }

    let pages: Vec<RunePage> = tables.into_iter().take(2).filter_map(parse_rune_table).collect();
    if pages.is_empty() {
        return Err(malformed("runes", "no complete rune page"));
    }
    Ok(pages)
}

/// Spell pairs from `"Flash - Ignite"` style cells
///
/// Pairs naming a spell unknown to the catalog are dropped rather than
/// guessed.
///
/// # Errors
/// - `Malformed` if the page has no spell cells at all
pub(crate) fn parse_summoner_spells(
    html: &str,
    catalog: &SpellCatalog,
    locale: &Locale,
) -> Result<Vec<SummonerSpellPair>, ProviderError> {
    let cells = markup::cell_span_texts(html);
    if cells.is_empty() {
        return Err(malformed("summoner spells", "no spell cells"));
    }

    let pairs = cells
        .iter()
        .filter_map(|cell| {
            let mut names = cell.split(" - ");
            let first = catalog.lookup(locale, names.next()?)?;
            let second = catalog.lookup(locale, names.next()?)?;
            if names.next().is_some() {
                return None;
            }
            Some(SummonerSpellPair::new(first, second))
        })
        .collect::<Vec<_>>();

    if pairs.len() < cells.len() {
        tracing::debug!(
            "[League of Graphs] {} of {} spell cells not recognized in {}",
            cells.len() - pairs.len(),
            cells.len(),
            locale
        );
    }
    Ok(pairs)
}

/// Skill max order, e.g. `Q => E => W`
///
/// Skills are ranked by how many points they get in levels 1-6, then
/// 7-12, then 13-18. `None` when the grid is missing.
pub(crate) fn parse_skill_order(html: &str) -> Option<String> {
    let cells = markup::tags_with_class(html, "skillCell");
    let mut counts = [[0u8; 3]; 3];
    let mut any_active = false;

    for (index, cell) in cells.iter().take(SKILL_CELLS).enumerate() {
        if markup::has_class(cell, "active") {
            counts[index / 18][(index % 18) / 6] += 1;
            any_active = true;
        }
    }
    if !any_active {
        return None;
    }

    let mut order = [0usize, 1, 2];
    order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
    Some(
        order
            .iter()
            .map(|i| SKILL_KEYS[*i])
            .collect::<Vec<_>>()
            .join(" => "),
    )
}

fn item_ids(fragment: &str) -> Vec<u32> {
    markup::images(fragment)
        .into_iter()
        .filter_map(|img| {
            let class = markup::attr(img, "class")?;
            ITEM_ID_RE.captures(class)?.get(1)?.as_str().parse().ok()
        })
        .collect()
}

fn starter_block(rank: usize, row: &str, skill_order: Option<&str>) -> Block {
    let win_rate = markup::class_texts(row, "percentage")
        .into_iter()
        .nth(WIN_RATE_CELL)
        .unwrap_or_else(|| "?".to_string());

    let label = match skill_order {
        Some(order) => BlockLabel::key_with_args(
            "item-sets-block-starter-wr-skill-order-numbered",
            vec![rank.to_string(), win_rate, order.to_string()],
        ),
        None => BlockLabel::key_with_args(
            "item-sets-block-starter-wr-numbered",
            vec![rank.to_string(), win_rate],
        ),
    };
    Block::new(label).with_items(item_ids(row))
}

/// Item set from the items page
///
/// The first table lists starter builds, one per row; the next three are
/// core, endgame and boots. Fixed trinket and consumable blocks frame them.
///
/// # Errors
/// - `Malformed` if neither starters nor core blocks are present
pub(crate) fn build_item_set(
    html: &str,
    request: &BuildRequest,
    skill_order: Option<&str>,
    max_starters: usize,
) -> Result<ItemSet, ProviderError> {
    let tables = markup::tables(markup::after_id(html, "mainContent"));
    let Some((starter_table, following)) = tables.split_first() else {
        return Err(malformed("item sets", "no item tables"));
    };

    let starters: Vec<Block> = markup::rows(starter_table)
        .into_iter()
        .filter(|row| !item_ids(row).is_empty())
        .take(max_starters)
        .enumerate()
        .map(|(i, row)| starter_block(i + 1, row, skill_order))
        .collect();

    let core: Vec<Block> = FOLLOWING_BLOCKS
        .iter()
        .zip(following)
        .map(|(key, table)| Block::new(BlockLabel::key(*key)).with_items(item_ids(table)))
        .filter(|block| !block.is_empty())
        .collect();

    if starters.is_empty() && core.is_empty() {
        return Err(malformed("item sets", "no item blocks"));
    }

    let dimension = request
        .position
        .map_or_else(|| request.game_mode.to_string(), |p| p.to_string());

    Ok(
        ItemSet::new(&request.champion.key, request.position, LeagueOfGraphs::ID)
            .with_title(format!("LOG {} - {}", request.champion.name, dimension))
            .with_blocks(starters)
            .with_blocks([Block::new(BlockLabel::key("item-sets-block-trinkets")).with_items(TRINKETS)])
            .with_blocks(core)
            .with_blocks([
                Block::new(BlockLabel::key("item-sets-block-consumables")).with_items(CONSUMABLES)
            ]),
    )
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use mana_schema::{Champion, GameMode, Position};
    use pretty_assertions::assert_eq;

    fn request() -> BuildRequest {
        BuildRequest::new(
            Champion::new(103, "Ahri", "Ahri"),
            Some(Position::Middle),
            GameMode::classic(),
        )
    }

    #[test]
    fn rune_pages_pick_most_opaque_perks() {
        let pages = parse_rune_pages(RUNES_PAGE).unwrap();
        assert_eq!(pages.len(), 2);

        // Row 6 has a dim option, so it is skipped as a shard row
        assert_eq!(pages[0], RunePage::new(8100, 8300, vec![8112, 8139, 8138, 8105, 5008]));
        assert_eq!(pages[1], RunePage::new(8200, 8000, vec![8214]));
    }

    #[test]
    fn rune_pages_reject_pages_without_tables() {
        assert!(matches!(
            parse_rune_pages("<html><body>Champion not found</body></html>"),
            Err(ProviderError::Malformed { what: "runes", .. })
        ));
    }

    #[test]
    fn rune_pages_require_styles() {
        let html = r#"<table><tr><td></td></tr><tr><td>
            <img src="//cdn.leagueofgraphs.com/img/perks/8112.png"></td></tr></table>"#;
        assert!(parse_rune_pages(html).is_err());
    }

    #[test]
    fn summoner_spells_map_known_names() {
        let catalog = SpellCatalog::english();
        let pairs = parse_summoner_spells(SPELLS_PAGE, &catalog, &Locale::new("en_US")).unwrap();
        assert_eq!(
            pairs,
            vec![SummonerSpellPair::new(4, 14), SummonerSpellPair::new(4, 12)]
        );
    }

    #[test]
    fn summoner_spells_without_cells_is_malformed() {
        let catalog = SpellCatalog::english();
        assert!(parse_summoner_spells("<p>oops</p>", &catalog, &Locale::default()).is_err());
    }

    #[test]
    fn skill_order_ranks_early_points() {
        assert_eq!(parse_skill_order(&skills_page()).as_deref(), Some("Q => E => W"));
        assert_eq!(parse_skill_order("<table></table>"), None);
    }

    #[test]
    fn item_set_layout() {
        let set = build_item_set(ITEMS_PAGE, &request(), Some("Q => E => W"), 3).unwrap();
        assert_eq!(set.title, "LOG Ahri - MIDDLE");
        assert_eq!(set.source_id, "leagueofgraphs");
        assert_eq!(set.champion_key, "Ahri");

        let labels: Vec<String> = set.blocks.iter().map(|b| b.label.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "item-sets-block-starter-wr-skill-order-numbered(1, 52.4%, Q => E => W)",
                "item-sets-block-starter-wr-skill-order-numbered(2, 50.9%, Q => E => W)",
                "item-sets-block-trinkets",
                "item-sets-block-core-build-wr",
                "item-sets-block-endgame",
                "item-sets-block-boots",
                "item-sets-block-consumables",
            ]
        );

        let starter_items: Vec<u32> = set.blocks[0].items.iter().map(|i| i.id).collect();
        assert_eq!(starter_items, vec![1056, 2003]);
        let core_items: Vec<u32> = set.blocks[3].items.iter().map(|i| i.id).collect();
        assert_eq!(core_items, vec![6655, 3020]);
    }

    #[test]
    fn item_set_respects_starter_limit() {
        let set = build_item_set(ITEMS_PAGE, &request(), None, 1).unwrap();
        assert_eq!(
            set.blocks[0].label,
            BlockLabel::key_with_args(
                "item-sets-block-starter-wr-numbered",
                vec!["1".to_string(), "52.4%".to_string()]
            )
        );
        assert_eq!(set.blocks[1].label, BlockLabel::key("item-sets-block-trinkets"));
    }

    #[test]
    fn starter_without_win_rate_cell_is_unknown() {
        let row = r#"<td><img class="requireTooltip items-1055-32"></td><td><div class="percentage">61.0%</div></td>"#;
        let block = starter_block(1, row, None);
        assert_eq!(
            block.label,
            BlockLabel::key_with_args(
                "item-sets-block-starter-wr-numbered",
                vec!["1".to_string(), "?".to_string()]
            )
        );
    }

    #[test]
    fn item_set_without_tables_is_malformed() {
        assert!(build_item_set("<div id=\"mainContent\"></div>", &request(), None, 3).is_err());
    }
}

//! Champion store persistence across instances

use mana_schema::{AggregatedResult, RunePage, SummonerSpellPair};
use mana_store::ChampionStore;
use pretty_assertions::assert_eq;

fn build() -> AggregatedResult {
    AggregatedResult {
        runes: vec![RunePage::new(8100, 8300, vec![8112, 8139])],
        item_sets: Vec::new(),
        summoner_spells: vec![SummonerSpellPair::new(4, 14)],
    }
}

#[tokio::test]
async fn saved_values_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let store = ChampionStore::new(dir.path());
    store.load().await.unwrap();
    store.set(103, build());
    store.save().await.unwrap();

    let reopened: ChampionStore<AggregatedResult> = ChampionStore::new(dir.path());
    reopened.load().await.unwrap();
    assert_eq!(reopened.cached_len(), 0);
    assert_eq!(reopened.get(103).await.unwrap(), Some(build()));
    assert_eq!(reopened.cached_len(), 1);
}

#[tokio::test]
async fn clear_removes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = ChampionStore::new(dir.path());
    store.load().await.unwrap();
    store.set(1, build());
    store.set(2, build());
    assert_eq!(store.save().await.unwrap(), 2);

    assert_eq!(store.clear().await.unwrap(), 2);
    assert_eq!(store.cached_len(), 0);
    assert_eq!(store.get(1).await.unwrap(), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store: ChampionStore<AggregatedResult> = ChampionStore::new(dir.path().join("ChampionData"));
    store.load().await.unwrap();
    store.load().await.unwrap();
    assert!(store.dir().is_dir());
}

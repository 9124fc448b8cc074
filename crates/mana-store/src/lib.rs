//! Mana Store - on-disk champion data
//!
//! One JSON file per champion id, fronted by an in-memory layer that is
//! flushed on [`ChampionStore::save`].

#![warn(unreachable_pub)]

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::ChampionStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

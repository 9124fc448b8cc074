//! Mana Schema - the common build model
//!
//! Every provider normalizes into these types and the aggregator merges
//! them:
//! - Champion identity, positions and game modes
//! - Request keys used for caching
//! - Rune pages, item sets and summoner spell pairs
//! - Capability tags declared by providers
//!
//! # Example
//!
//! ```rust
//! use mana_schema::{Champion, GameMode, Position, RequestKey};
//!
//! let ahri = Champion::new(103, "Ahri", "Ahri");
//! let mode = GameMode::classic();
//!
//! let key = RequestKey::new(ahri.id, Some(Position::Middle), &mode);
//! assert_eq!(key.as_str(), "103.MIDDLE");
//! assert_eq!(key.runes_key(), "runes.103.MIDDLE");
//! ```

#![warn(unreachable_pub)]

pub mod build;
pub mod capability;
pub mod champion;
pub mod error;

pub use build::{
    AggregatedResult, Block, BlockItem, BlockLabel, Category, ItemSet, RunePage,
    SummonerSpellPair,
};
pub use capability::{Capability, CapabilitySet};
pub use champion::{BuildRequest, Champion, GameMode, Position, RequestKey};
pub use error::SchemaError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

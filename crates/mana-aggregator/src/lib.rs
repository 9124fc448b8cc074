//! Mana Aggregator - multi-source build resolution
//!
//! [`BuildAggregator`] walks an ordered provider list, asks each one only for
//! what is still missing, merges the partial results and caches rune pages
//! and summoner spells per request key.
//!
//! # Example
//!
//! ```rust,no_run
//! use mana_aggregator::prelude::*;
//! use mana_providers::{default_providers, HttpConfig, ProviderContext, ReqwestClient};
//! use mana_schema::{Champion, GameMode, Position};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let http = ReqwestClient::new(&HttpConfig::default())?;
//! let providers = default_providers(&ProviderContext::new(Arc::new(http)));
//! let aggregator = BuildAggregator::new(providers, ResultCache::in_memory(), AggregatorConfig::default());
//!
//! let ahri = Champion::new(103, "Ahri", "Ahri");
//! let build = aggregator
//!     .resolve(&ahri, Some(Position::Middle), &GameMode::classic())
//!     .await?;
//! println!("{} rune pages", build.runes.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod error;

pub use aggregator::{
    merge_contribution, next_capability, AttemptOutcome, BuildAggregator, MergeOutcome,
    ProviderAttempt, Resolution,
};
pub use cache::{CacheStats, KeyValueStore, MemoryStore, ResultCache};
pub use config::AggregatorConfig;
pub use error::AggregatorError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregator::{BuildAggregator, Resolution};
    pub use crate::cache::{KeyValueStore, MemoryStore, ResultCache};
    pub use crate::config::AggregatorConfig;
    pub use crate::error::AggregatorError;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

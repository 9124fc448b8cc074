//! Mana Providers - upstream build sources
//!
//! Each provider fetches one external source and normalizes it into the
//! [`mana_schema`] types. Providers declare the capabilities they support
//! and the aggregator only calls those.
//!
//! Shipped providers:
//! - [`LeagueOfGraphs`]: HTML pages, every capability
//! - [`LolFlavor`]: JSON item sets
//!
//! # Example
//!
//! ```rust,no_run
//! use mana_providers::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let http = ReqwestClient::new(&HttpConfig::default())?;
//! let ctx = ProviderContext::new(Arc::new(http));
//! let providers = default_providers(&ctx);
//! assert_eq!(providers[0].id(), "leagueofgraphs");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod context;
pub mod error;
pub mod http;
pub mod league_of_graphs;
pub mod locale;
pub mod lolflavor;
pub mod markup;
pub mod provider;

pub use context::{ProviderContext, ProviderSettings};
pub use error::{FetchError, ProviderError};
pub use http::{get_optional, HttpClient, HttpConfig, ReqwestClient};
pub use league_of_graphs::LeagueOfGraphs;
pub use locale::{Locale, LocaleHandle, SpellCatalog};
pub use lolflavor::LolFlavor;
pub use provider::{
    build_provider, build_providers, default_providers, Contribution, Provider,
    DEFAULT_PROVIDER_ORDER,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{ProviderContext, ProviderSettings};
    pub use crate::error::{FetchError, ProviderError};
    pub use crate::http::{HttpClient, HttpConfig, ReqwestClient};
    pub use crate::locale::{Locale, LocaleHandle, SpellCatalog};
    pub use crate::provider::{build_providers, default_providers, Contribution, Provider};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

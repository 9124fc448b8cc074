//! Provider capability tags
//!
//! A provider declares up front which fetches it supports. The aggregator
//! checks membership in that set instead of probing the provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One fetch a provider may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Runes, item sets and summoner spells in one call
    FetchAll,
    /// Item sets only
    ItemSets,
    /// Summoner spells only
    SummonerSpells,
    /// Rune pages only
    Runes,
}

impl Capability {
    /// All capabilities, in selection priority order
    pub const ALL: [Capability; 4] = [
        Capability::FetchAll,
        Capability::ItemSets,
        Capability::SummonerSpells,
        Capability::Runes,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Capability::FetchAll => 1,
            Capability::ItemSets => 1 << 1,
            Capability::SummonerSpells => 1 << 2,
            Capability::Runes => 1 << 3,
        }
    }

    /// Method-style name used in logs
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::FetchAll => "fetch_all",
            Capability::ItemSets => "fetch_item_sets",
            Capability::SummonerSpells => "fetch_summoner_spells",
            Capability::Runes => "fetch_runes",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of capabilities declared by a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// No capabilities
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every capability
    #[inline]
    #[must_use]
    pub const fn all() -> Self {
        Self::empty()
            .with(Capability::FetchAll)
            .with(Capability::ItemSets)
            .with(Capability::SummonerSpells)
            .with(Capability::Runes)
    }

    /// Add a capability
    #[inline]
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub const fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether no capability is declared
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate declared capabilities in priority order
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_set_membership() {
        let set = CapabilitySet::empty().with(Capability::ItemSets);
        assert!(set.contains(Capability::ItemSets));
        assert!(!set.contains(Capability::FetchAll));
        assert!(!set.is_empty());
        assert!(CapabilitySet::empty().is_empty());
    }

    #[test]
    fn capability_set_all() {
        let all = CapabilitySet::all();
        for capability in Capability::ALL {
            assert!(all.contains(capability));
        }
        assert_eq!(all.iter().count(), 4);
    }

    #[test]
    fn capability_set_from_iter() {
        let set: CapabilitySet = [Capability::Runes, Capability::SummonerSpells]
            .into_iter()
            .collect();
        let listed: Vec<_> = set.iter().collect();
        assert_eq!(listed, vec![Capability::SummonerSpells, Capability::Runes]);
    }
}

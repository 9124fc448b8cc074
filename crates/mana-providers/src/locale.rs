//! Active display language and summoner spell names
//!
//! Some sources only publish display names (e.g. "Flash - Ignite"), so
//! mapping them back to spell ids depends on the client's language.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Client locale identifier (`en_US`, `fr_FR`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Create locale from identifier
    #[inline]
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    /// Identifier string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the English client locales
    #[inline]
    #[must_use]
    pub fn is_english(&self) -> bool {
        matches!(self.0.as_str(), "en_US" | "en_GB")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en_US")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared, updatable handle to the active locale
///
/// The client language can change while the process runs; providers read
/// it at call time.
#[derive(Debug, Clone, Default)]
pub struct LocaleHandle {
    inner: Arc<RwLock<Locale>>,
}

impl LocaleHandle {
    /// Create handle with initial locale
    #[inline]
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            inner: Arc::new(RwLock::new(locale)),
        }
    }

    /// Current locale
    #[inline]
    #[must_use]
    pub fn get(&self) -> Locale {
        self.inner.read().clone()
    }

    /// Replace the current locale
    #[inline]
    pub fn set(&self, locale: Locale) {
        *self.inner.write() = locale;
    }
}

/// Display-name to spell-id lookup, per locale
#[derive(Debug, Clone, Default)]
pub struct SpellCatalog {
    by_locale: HashMap<String, HashMap<String, u32>>,
}

/// English names of the standard summoner spells
const ENGLISH_SPELLS: &[(&str, u32)] = &[
    ("Cleanse", 1),
    ("Exhaust", 3),
    ("Flash", 4),
    ("Ghost", 6),
    ("Heal", 7),
    ("Smite", 11),
    ("Teleport", 12),
    ("Clarity", 13),
    ("Ignite", 14),
    ("Barrier", 21),
    ("Mark", 32),
];

impl SpellCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in English names for `en_US` and `en_GB`
    #[must_use]
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for locale in ["en_US", "en_GB"] {
            for (name, id) in ENGLISH_SPELLS {
                catalog.insert(&Locale::new(locale), *name, *id);
            }
        }
        catalog
    }

    /// Register a display name
    pub fn insert(&mut self, locale: &Locale, name: impl Into<String>, id: u32) {
        self.by_locale
            .entry(locale.as_str().to_string())
            .or_default()
            .insert(name.into(), id);
    }

    /// Look up a display name
    #[must_use]
    pub fn lookup(&self, locale: &Locale, name: &str) -> Option<u32> {
        self.by_locale.get(locale.as_str())?.get(name.trim()).copied()
    }

    /// Whether any names are known for a locale
    #[must_use]
    pub fn supports(&self, locale: &Locale) -> bool {
        self.by_locale
            .get(locale.as_str())
            .is_some_and(|names| !names.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_catalog_lookup() {
        let catalog = SpellCatalog::english();
        let us = Locale::new("en_US");
        assert_eq!(catalog.lookup(&us, "Flash"), Some(4));
        assert_eq!(catalog.lookup(&us, " Ignite "), Some(14));
        assert_eq!(catalog.lookup(&us, "Embrasement"), None);
        assert!(catalog.supports(&Locale::new("en_GB")));
        assert!(!catalog.supports(&Locale::new("fr_FR")));
    }

    #[test]
    fn locale_handle_updates_are_shared() {
        let handle = LocaleHandle::default();
        let other = handle.clone();
        assert!(handle.get().is_english());

        other.set(Locale::new("de_DE"));
        assert_eq!(handle.get().as_str(), "de_DE");
        assert!(!handle.get().is_english());
    }
}

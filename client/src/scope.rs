//! Per-surface search presets.
//!
//! Each portal surface tunes the same engine differently: which filters it
//! understands, what a fresh session pre-selects, and which zero-result
//! fallbacks are allowed to fire.

use common::filter_set::ActiveFilterSet;
use common::search_const::PAGE_SIZE;

/// Filter keys the portal understands, in their canonical lowercase form.
/// Keys decoded from a URL are case-normalized against this list.
pub const KNOWN_FILTER_KEYS: &[&str] = &[
    "contenttype",
    "catalogpaths",
    "source",
    "locale",
    "duration",
    "skilllevel",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchScope {
    pub name: &'static str,
    pub known_filter_keys: &'static [&'static str],
    /// Pairs pre-selected in a fresh session, in canonical key form.
    pub default_filters: &'static [(&'static str, &'static str)],
    /// Send multi-word queries as exact phrases.
    pub phrase_search: bool,
    pub primary_locale: &'static str,
    /// Locales the zero-result fallback widens into; empty disables it.
    pub expansion_locales: &'static [&'static str],
    pub page_size: u64,
}

pub const LEARNING: SearchScope = SearchScope {
    name: "learning",
    known_filter_keys: KNOWN_FILTER_KEYS,
    default_filters: &[("contenttype", "Course")],
    phrase_search: true,
    primary_locale: "en",
    expansion_locales: &["de", "fr", "es"],
    page_size: PAGE_SIZE,
};

pub const KNOWLEDGE: SearchScope = SearchScope {
    name: "knowledge",
    known_filter_keys: KNOWN_FILTER_KEYS,
    default_filters: &[],
    phrase_search: true,
    primary_locale: "en",
    expansion_locales: &["de", "fr", "es"],
    page_size: PAGE_SIZE,
};

pub const SOCIAL: SearchScope = SearchScope {
    name: "social",
    known_filter_keys: KNOWN_FILTER_KEYS,
    default_filters: &[],
    phrase_search: false,
    primary_locale: "en",
    expansion_locales: &[],
    page_size: PAGE_SIZE,
};

impl SearchScope {
    pub fn by_name(name: &str) -> Option<&'static SearchScope> {
        match name {
            "learning" => Some(&LEARNING),
            "knowledge" => Some(&KNOWLEDGE),
            "social" => Some(&SOCIAL),
            _ => None,
        }
    }

    pub fn expansion_enabled(&self) -> bool {
        !self.expansion_locales.is_empty()
    }

    /// The filter selection a fresh session starts from.
    pub fn default_filter_set(&self) -> ActiveFilterSet {
        let mut filters = ActiveFilterSet::new();
        for (key, value) in self.default_filters {
            filters.add(key, value);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_resolves_presets() {
        assert_eq!(SearchScope::by_name("learning"), Some(&LEARNING));
        assert_eq!(SearchScope::by_name("knowledge"), Some(&KNOWLEDGE));
        assert_eq!(SearchScope::by_name("social"), Some(&SOCIAL));
        assert_eq!(SearchScope::by_name("Learning"), None);
    }

    #[test]
    fn test_learning_preselects_courses() {
        let filters = LEARNING.default_filter_set();
        assert!(filters.contains("contenttype", "Course"));
        assert!(KNOWLEDGE.default_filter_set().is_empty());
    }

    #[test]
    fn test_social_disables_fallbacks() {
        assert!(!SOCIAL.expansion_enabled());
        assert!(LEARNING.expansion_enabled());
    }
}

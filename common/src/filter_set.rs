//! The active filter selection and its URL query-parameter codec.
//!
//! The whole selection travels in a single query parameter as a JSON
//! object, `{"contenttype":["Course","Video"]}`. Keys stay sorted so the
//! encoded form is stable for a given selection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter keys mapped to their selected values, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ActiveFilterSet(pub BTreeMap<String, Vec<String>>);

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.0
            .get(key)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Add a value under a key. Returns false if the pair was already
    /// selected.
    pub fn add(&mut self, key: &str, value: &str) -> bool {
        let values = self.0.entry(key.to_string()).or_default();
        if values.iter().any(|v| v == value) {
            return false;
        }
        values.push(value.to_string());
        true
    }

    /// Remove a value from a key, dropping the key once no values remain.
    /// Returns false if the pair was not selected.
    pub fn remove(&mut self, key: &str, value: &str) -> bool {
        let Some(values) = self.0.get_mut(key) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;
        if values.is_empty() {
            self.0.remove(key);
        }
        removed
    }

    /// Fold another selection into this one, skipping pairs already
    /// present.
    pub fn merge(&mut self, other: &ActiveFilterSet) {
        for (key, values) in other.0.iter() {
            for value in values {
                self.add(key, value);
            }
        }
    }

    /// Rewrite any key that matches a known key case-insensitively to its
    /// lowercase form. Unknown keys keep their casing. Applying this twice
    /// changes nothing.
    pub fn lower_case_keys(&mut self, known_keys: &[&str]) {
        let to_rewrite: Vec<String> = self
            .0
            .keys()
            .filter(|key| {
                key.chars().any(|c| c.is_ascii_uppercase())
                    && known_keys.iter().any(|known| known.eq_ignore_ascii_case(key))
            })
            .cloned()
            .collect();
        for key in to_rewrite {
            if let Some(values) = self.0.remove(&key) {
                let lowered = key.to_ascii_lowercase();
                // add() deduplicates when the lowered key already exists
                for value in values {
                    self.add(&lowered, &value);
                }
            }
        }
    }

    /// Serialize for the `f` query parameter.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse the `f` query parameter. Absent, empty or malformed payloads
    /// all come back as the empty selection; decoding never fails.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        serde_json::from_str(raw).unwrap_or_default()
    }
}

impl fmt::Display for ActiveFilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_selection_order_and_dedupes() {
        let mut filters = ActiveFilterSet::new();
        assert!(filters.add("source", "Wiki"));
        assert!(filters.add("source", "Blog"));
        assert!(!filters.add("source", "Wiki"));
        assert_eq!(filters.0["source"], vec!["Wiki", "Blog"]);
    }

    #[test]
    fn test_remove_drops_empty_keys() {
        let mut filters = ActiveFilterSet::new();
        filters.add("source", "Wiki");
        assert!(filters.remove("source", "Wiki"));
        assert!(filters.is_empty());
        assert!(!filters.remove("source", "Wiki"));
        assert!(!filters.remove("locale", "en"));
    }

    #[test]
    fn test_encode_single_pair() {
        let mut filters = ActiveFilterSet::new();
        filters.add("type", "value");
        assert_eq!(filters.encode(), r#"{"type":["value"]}"#);
        assert_eq!(filters.to_string(), filters.encode());
    }

    #[test]
    fn test_encode_orders_keys() {
        let mut filters = ActiveFilterSet::new();
        filters.add("source", "Wiki");
        filters.add("contenttype", "Course");
        assert_eq!(
            filters.encode(),
            r#"{"contenttype":["Course"],"source":["Wiki"]}"#
        );
    }

    #[test]
    fn test_decode_round_trips() {
        let mut filters = ActiveFilterSet::new();
        filters.add("contenttype", "Course");
        filters.add("contenttype", "Video");
        filters.add("locale", "en");
        let decoded = ActiveFilterSet::decode(Some(&filters.encode()));
        assert_eq!(decoded, filters);
    }

    #[test]
    fn test_decode_tolerates_bad_payloads() {
        assert!(ActiveFilterSet::decode(None).is_empty());
        assert!(ActiveFilterSet::decode(Some("")).is_empty());
        assert!(ActiveFilterSet::decode(Some("not json")).is_empty());
        assert!(ActiveFilterSet::decode(Some(r#"{"key":"not a list"}"#)).is_empty());
        assert!(ActiveFilterSet::decode(Some(r#"[1,2,3]"#)).is_empty());
    }

    #[test]
    fn test_lower_case_keys_rewrites_known_keys_only() {
        let mut filters = ActiveFilterSet::decode(Some(
            r#"{"ContentType":["Course"],"MyCustom":["x"]}"#,
        ));
        filters.lower_case_keys(&["contenttype", "locale"]);
        assert!(filters.contains("contenttype", "Course"));
        assert!(filters.contains("MyCustom", "x"));
        assert!(!filters.0.contains_key("ContentType"));
    }

    #[test]
    fn test_lower_case_keys_is_idempotent() {
        let mut filters = ActiveFilterSet::decode(Some(r#"{"LOCALE":["en"]}"#));
        filters.lower_case_keys(&["locale"]);
        let once = filters.clone();
        filters.lower_case_keys(&["locale"]);
        assert_eq!(filters, once);
        assert_eq!(filters.encode(), r#"{"locale":["en"]}"#);
    }

    #[test]
    fn test_lower_case_keys_merges_collisions() {
        let mut filters = ActiveFilterSet::decode(Some(
            r#"{"Locale":["en","de"],"locale":["en","fr"]}"#,
        ));
        filters.lower_case_keys(&["locale"]);
        assert_eq!(filters.0.len(), 1);
        assert_eq!(filters.0["locale"], vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let mut filters = ActiveFilterSet::new();
        filters.add("contenttype", "Course");
        let incoming = ActiveFilterSet::decode(Some(
            r#"{"contenttype":["Course","Video"],"locale":["en"]}"#,
        ));
        filters.merge(&incoming);
        assert_eq!(filters.0["contenttype"], vec!["Course", "Video"]);
        assert_eq!(filters.0["locale"], vec!["en"]);
    }
}

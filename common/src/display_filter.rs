//! Normalized filter shapes, ready for a host UI to render.

use serde::{Deserialize, Serialize};

/// One filter group shown to the user, derived from a raw facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayFilter {
    pub display_name: String,
    pub r#type: String,
    pub content: Vec<FilterEntry>,
}

/// A selectable row inside a filter group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterEntry {
    pub display_name: String,
    pub r#type: String,
    pub count: u64,
    pub id: String,
}

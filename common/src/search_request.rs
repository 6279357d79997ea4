//! The request body sent to the search service.

use serde::{Deserialize, Serialize};

use crate::filter_set::ActiveFilterSet;
use crate::search_const::PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub query: String,
    pub filters: ActiveFilterSet,
    pub sort: Vec<SortField>,
    /// Zero-based page index.
    pub page_no: u64,
    pub page_size: u64,
    /// Locales searched, primary first.
    pub locale: Vec<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: ActiveFilterSet::default(),
            sort: Vec::new(),
            page_no: 0,
            page_size: PAGE_SIZE,
            locale: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

//! Raw facet shapes as the search service reports them.

use serde::{Deserialize, Serialize};

/// One aggregation block from a search response, e.g. `contentType`
/// with a value per distinct type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Facet {
    pub name: String,
    pub values: Vec<FacetValue>,
}

/// A single bucket inside a facet. Hierarchical facets nest their
/// sub-buckets under `children`; flat facets leave it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetValue {
    pub name: String,
    pub count: u64,
    pub children: Option<Vec<FacetValue>>,
}

//! Constants shared across the search pipeline.

/// Results requested per page unless a scope overrides it.
pub const PAGE_SIZE: u64 = 10;

/// URL query parameter carrying the encoded filter selection.
pub const FILTER_QUERY_PARAM: &str = "f";

/// Facet the server reports as a parent/child catalog hierarchy.
pub const CATALOG_PATHS_FACET: &str = "catalogPaths";

/// Ceiling on reachable results, mirroring the service's pagination cap.
pub const MAX_PAGINATION_RESULT_LIMIT: u64 = 10_000;

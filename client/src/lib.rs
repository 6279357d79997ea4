//! Client-side search engine: facet normalization, session state and the
//! HTTP gateway toward the portal search service.

pub mod api;
pub mod normalize;
pub mod scope;
pub mod session;

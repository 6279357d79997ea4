//! Common library exports shared between the search engine and its hosts.

pub mod display_filter;
pub mod facet;
pub mod filter_set;
pub mod search_const;
pub mod search_request;
pub mod search_response;

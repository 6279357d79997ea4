//! HTTP boundary toward the portal search service.

mod search_gateway;
pub use search_gateway::SearchGateway;

mod portal_link;
pub use portal_link::portal_link;

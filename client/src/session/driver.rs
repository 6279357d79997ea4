//! Drives a dispatched search through a backend until the session rests.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use common::search_request::SearchRequest;
use common::search_response::SearchResponse;

use super::{ApplyOutcome, DispatchedSearch, SearchSession};

/// Anything that can answer a search request. The HTTP gateway is the
/// real implementation; tests script their own.
#[async_trait]
pub trait SearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

/// Send `dispatch` and keep following the session's follow-up dispatches
/// (relaxed defaults, widened locales) until it settles.
pub async fn run_search<B>(session: &mut SearchSession, backend: &B, dispatch: DispatchedSearch)
where
    B: SearchBackend + ?Sized,
{
    let mut pending = dispatch;
    loop {
        let result = backend.search(&pending.request).await;
        match session.apply_response(pending.generation, result) {
            ApplyOutcome::Settled | ApplyOutcome::Stale => break,
            ApplyOutcome::Requery(next, cause) => {
                debug!("Following zero-result fallback: {:?}", cause);
                pending = next;
            }
        }
    }
}

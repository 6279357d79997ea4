//! One user's search session: the current request, its lifecycle, and the
//! reducer that folds service responses into page state.

mod driver;

pub use driver::{SearchBackend, run_search};

use anyhow::Result;
use tracing::{debug, info};

use common::display_filter::DisplayFilter;
use common::filter_set::ActiveFilterSet;
use common::search_const::{FILTER_QUERY_PARAM, MAX_PAGINATION_RESULT_LIMIT};
use common::search_request::{SearchRequest, SortField};
use common::search_response::{SearchResponse, SearchResultItem};

use crate::normalize::normalize_facets;
use crate::scope::SearchScope;

/// Where the session currently rests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing dispatched yet.
    Idle,
    /// The latest dispatched request has no answer yet.
    Querying,
    /// The last applied response carried results.
    Populated,
    /// The last applied response carried nothing and every fallback is
    /// spent.
    Empty,
    /// The service failed; the payload is the user-facing error text.
    Failed(String),
}

/// Whether pages exist past the one currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    HasMore,
    Done,
}

/// The applied slice of a response, as a host renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub results: Vec<SearchResultItem>,
    pub total_hits: u64,
    pub status: PageStatus,
    pub filters: Vec<DisplayFilter>,
}

impl ResultPage {
    /// Number of reachable pages, honoring the service's pagination cap.
    pub fn page_count(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_hits.min(MAX_PAGINATION_RESULT_LIMIT).div_ceil(page_size)
    }
}

/// A request the host must now send, tagged with the generation that was
/// current when it was issued. The session only applies a response whose
/// generation is still the latest.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedSearch {
    pub generation: u64,
    pub request: SearchRequest,
}

/// New value for the filter query parameter after a filter operation.
/// `None` means the parameter should be dropped from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterNavigation {
    pub f: Option<String>,
}

/// Which zero-result fallback produced a follow-up dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequeryCause {
    DefaultsRelaxed,
    LocaleExpanded,
}

/// Verdict of applying one response to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The session reached a resting phase.
    Settled,
    /// Zero hits with a fallback left to try; send this follow-up.
    Requery(DispatchedSearch, RequeryCause),
    /// The response answers a superseded dispatch; nothing changed.
    Stale,
}

pub struct SearchSession {
    scope: SearchScope,
    request: SearchRequest,
    phase: SessionPhase,
    generation: u64,
    relaxed_defaults: bool,
    expanded_locale: bool,
    page: Option<ResultPage>,
}

impl SearchSession {
    pub fn new(scope: SearchScope) -> Self {
        let request = SearchRequest {
            filters: scope.default_filter_set(),
            page_size: scope.page_size,
            locale: vec![scope.primary_locale.to_string()],
            ..SearchRequest::default()
        };
        Self {
            scope,
            request,
            phase: SessionPhase::Idle,
            generation: 0,
            relaxed_defaults: false,
            expanded_locale: false,
            page: None,
        }
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The request as the user built it; dispatched copies may differ
    /// (phrase quoting).
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn page(&self) -> Option<&ResultPage> {
        self.page.as_ref()
    }

    /// Encoded filter selection for the URL, `None` when nothing is
    /// selected.
    pub fn filter_param(&self) -> Option<String> {
        if self.request.filters.is_empty() {
            None
        } else {
            Some(self.request.filters.encode())
        }
    }

    /// True if the pair is selected, after case-normalizing the key the
    /// same way filter operations do.
    pub fn has_filter(&self, key: &str, value: &str) -> bool {
        self.request.filters.contains(&self.canonical_key(key), value)
    }

    /// Fold a filter selection decoded from the URL into the session, as
    /// on route entry. Known keys in foreign casing are lowered first.
    pub fn hydrate_filters(&mut self, raw: Option<&str>) -> DispatchedSearch {
        let mut decoded = ActiveFilterSet::decode(raw);
        decoded.lower_case_keys(self.scope.known_filter_keys);
        self.request.filters.merge(&decoded);
        self.request.page_no = 0;
        self.user_dispatch()
    }

    pub fn set_query(&mut self, query: &str) -> DispatchedSearch {
        self.request.query = query.trim().to_string();
        self.request.page_no = 0;
        self.user_dispatch()
    }

    /// Re-run the current request, e.g. right after hydration.
    pub fn refresh(&mut self) -> DispatchedSearch {
        self.user_dispatch()
    }

    pub fn add_filter(&mut self, key: &str, value: &str) -> (FilterNavigation, DispatchedSearch) {
        let key = self.canonical_key(key);
        self.request.filters.add(&key, value);
        self.request.page_no = 0;
        (self.navigation(), self.user_dispatch())
    }

    pub fn remove_filter(&mut self, key: &str, value: &str) -> (FilterNavigation, DispatchedSearch) {
        let key = self.canonical_key(key);
        self.request.filters.remove(&key, value);
        self.request.page_no = 0;
        (self.navigation(), self.user_dispatch())
    }

    pub fn clear_filters(&mut self) -> (FilterNavigation, DispatchedSearch) {
        self.request.filters = ActiveFilterSet::new();
        self.request.page_no = 0;
        (self.navigation(), self.user_dispatch())
    }

    pub fn set_sort(&mut self, sort: Vec<SortField>) -> DispatchedSearch {
        self.request.sort = sort;
        self.request.page_no = 0;
        self.user_dispatch()
    }

    pub fn set_page(&mut self, page_no: u64) -> DispatchedSearch {
        // The service never serves hits past the pagination cap, so pages
        // past it are unreachable.
        let last_page =
            MAX_PAGINATION_RESULT_LIMIT.saturating_sub(1) / self.request.page_size.max(1);
        self.request.page_no = page_no.min(last_page);
        self.user_dispatch()
    }

    /// Advance one page, unless the current page already said `Done`.
    pub fn next_page(&mut self) -> Option<DispatchedSearch> {
        let has_more = self
            .page
            .as_ref()
            .is_some_and(|page| page.status == PageStatus::HasMore);
        if !has_more {
            return None;
        }
        Some(self.set_page(self.request.page_no + 1))
    }

    pub fn prev_page(&mut self) -> Option<DispatchedSearch> {
        if self.request.page_no == 0 {
            return None;
        }
        Some(self.set_page(self.request.page_no - 1))
    }

    /// Query parameters reconstructing this search in a portal URL.
    pub fn share_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("q".to_string(), self.request.query.clone())];
        if self.request.page_no > 0 {
            params.push(("pageNo".to_string(), self.request.page_no.to_string()));
        }
        if let Some(f) = self.filter_param() {
            params.push((FILTER_QUERY_PARAM.to_string(), f));
        }
        params
    }

    /// Fold one response into the session. Only the latest generation is
    /// accepted; anything older is dropped unapplied.
    pub fn apply_response(
        &mut self,
        generation: u64,
        result: Result<SearchResponse>,
    ) -> ApplyOutcome {
        if generation != self.generation {
            debug!(
                "Dropping stale response for search #{} (latest is #{})",
                generation, self.generation
            );
            return ApplyOutcome::Stale;
        }
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.phase = SessionPhase::Failed(format!("Search failed: {e:#}"));
                return ApplyOutcome::Settled;
            }
        };
        if response.total_hits == 0 {
            if self.defaults_active() && !self.relaxed_defaults {
                self.relaxed_defaults = true;
                self.strip_default_filters();
                info!("No hits, retrying without default filters");
                return ApplyOutcome::Requery(self.dispatch(), RequeryCause::DefaultsRelaxed);
            }
            if self.scope.expansion_enabled() && !self.expanded_locale {
                self.expanded_locale = true;
                self.expand_locale();
                info!("No hits, retrying across locales: {:?}", self.request.locale);
                return ApplyOutcome::Requery(self.dispatch(), RequeryCause::LocaleExpanded);
            }
            self.page = Some(ResultPage {
                results: Vec::new(),
                total_hits: 0,
                status: PageStatus::Done,
                filters: normalize_facets(&response.facets),
            });
            self.phase = SessionPhase::Empty;
            return ApplyOutcome::Settled;
        }
        let status = if response.total_hits > (self.request.page_no + 1) * self.request.page_size {
            PageStatus::HasMore
        } else {
            PageStatus::Done
        };
        self.page = Some(ResultPage {
            results: response.results,
            total_hits: response.total_hits,
            status,
            filters: normalize_facets(&response.facets),
        });
        self.phase = SessionPhase::Populated;
        ApplyOutcome::Settled
    }

    fn canonical_key(&self, key: &str) -> String {
        if self
            .scope
            .known_filter_keys
            .iter()
            .any(|known| known.eq_ignore_ascii_case(key))
        {
            key.to_ascii_lowercase()
        } else {
            key.to_string()
        }
    }

    fn navigation(&self) -> FilterNavigation {
        FilterNavigation {
            f: self.filter_param(),
        }
    }

    fn reset_fallbacks(&mut self) {
        self.relaxed_defaults = false;
        self.expanded_locale = false;
    }

    /// A user-initiated dispatch re-arms the zero-result fallbacks and
    /// narrows back to the primary locale. Dropped default filters stay
    /// dropped; they are visible filter state.
    fn user_dispatch(&mut self) -> DispatchedSearch {
        self.reset_fallbacks();
        self.request.locale = vec![self.scope.primary_locale.to_string()];
        self.dispatch()
    }

    fn dispatch(&mut self) -> DispatchedSearch {
        self.generation += 1;
        self.phase = SessionPhase::Querying;
        let mut request = self.request.clone();
        if self.scope.phrase_search {
            request.query = phrase_query(&request.query);
        }
        debug!(
            "Dispatching search #{}: {:?} (page {})",
            self.generation, request.query, request.page_no
        );
        DispatchedSearch {
            generation: self.generation,
            request,
        }
    }

    /// True while every default pair of the scope is still selected.
    fn defaults_active(&self) -> bool {
        let defaults = self.scope.default_filters;
        !defaults.is_empty()
            && defaults
                .iter()
                .all(|(key, value)| self.request.filters.contains(key, value))
    }

    fn strip_default_filters(&mut self) {
        for (key, value) in self.scope.default_filters {
            self.request.filters.remove(key, value);
        }
    }

    fn expand_locale(&mut self) {
        for locale in self.scope.expansion_locales {
            if !self.request.locale.iter().any(|l| l == locale) {
                self.request.locale.push((*locale).to_string());
            }
        }
    }
}

/// Wrap a multi-word query in quotes for exact-phrase matching. Single
/// words and queries the user already quoted pass through untouched.
pub fn phrase_query(query: &str) -> String {
    let trimmed = query.trim();
    let already_quoted = trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"');
    if already_quoted || !trimmed.contains(char::is_whitespace) {
        return trimmed.to_string();
    }
    format!("\"{trimmed}\"")
}

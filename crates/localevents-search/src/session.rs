//! Search session coordinator
//!
//! Owns the five facet states and the query they were built for. Every
//! request handed out is tagged with the session epoch; the epoch moves on
//! each time the effective query changes, and outcomes from an older epoch
//! are dropped instead of merged.

use std::fmt;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::accumulator::{FacetAction, FacetError, FacetState};
use crate::api::CollectionApi;
use crate::error::{Result, SearchError};
use crate::facet::Facet;
use crate::planner::{plan, ListQuery};
use crate::query::SearchQuery;
use crate::record::{Page, Record};
use crate::sync::UrlState;
use crate::view::AggregateView;

/// Identity of the query a request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One page of one facet, possibly spread over several list queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub epoch: Epoch,
    pub facet: Facet,
    pub page: u32,
    pub queries: Vec<ListQuery>,
}

/// The merged answer to a [`FetchRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub epoch: Epoch,
    pub facet: Facet,
    pub page: u32,
    pub result: std::result::Result<Page<Record>, FacetError>,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: SearchQuery,
    epoch: Epoch,
    page_size: u32,
    facets: [FacetState; 5],
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: SearchQuery::default(),
            epoch: Epoch::default(),
            page_size: page_size.max(1),
            facets: Facet::ALL.map(FacetState::new),
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn facet(&self, facet: Facet) -> &FacetState {
        &self.facets[facet.index()]
    }

    pub fn facets(&self) -> &[FacetState; 5] {
        &self.facets
    }

    /// Follow the URL state; see [`SearchSession::apply_query`]
    pub fn apply_url(&mut self, url: &UrlState) -> Vec<FetchRequest> {
        self.apply_query(url.search_query())
    }

    /// Switch to `query`.
    ///
    /// If the effective query is unchanged nothing happens and no requests
    /// are returned. Otherwise every facet is reset, the epoch advances and
    /// the page-1 requests for the new query are returned (none when the
    /// query is blank).
    pub fn apply_query(&mut self, query: SearchQuery) -> Vec<FetchRequest> {
        if query == self.query {
            return Vec::new();
        }

        self.query = query;
        self.epoch = self.epoch.next();
        for state in &mut self.facets {
            state.reduce(FacetAction::Reset);
        }
        info!(
            epoch = %self.epoch,
            name = %self.query.name,
            deep = self.query.deep,
            "Search query changed, facets reset"
        );

        if self.query.is_blank() {
            return Vec::new();
        }
        Facet::ALL
            .into_iter()
            .filter_map(|facet| self.start(facet))
            .collect()
    }

    /// Request the next page of one facet.
    ///
    /// Only possible when the API reported more pages and no request for the
    /// facet is outstanding. Other facets are left untouched.
    pub fn load_more(&mut self, facet: Facet) -> Result<FetchRequest> {
        let cursor = self.facet(facet).cursor();
        if cursor.is_loading() {
            return Err(SearchError::LoadInFlight { facet });
        }
        if !cursor.can_load_more() {
            return Err(SearchError::NoMorePages { facet });
        }
        self.start(facet).ok_or(SearchError::NoMorePages { facet })
    }

    fn start(&mut self, facet: Facet) -> Option<FetchRequest> {
        let epoch = self.epoch;
        let page_size = self.page_size;
        let page = self.facet(facet).cursor().next_page()?;
        let queries = plan(facet, &self.query, page, page_size);
        let state = &mut self.facets[facet.index()];
        state.reduce(FacetAction::LoadStarted { page });

        if queries.is_empty() {
            // nothing to ask this collection for: settle it as an empty page
            state.reduce(FacetAction::PageLoaded {
                page,
                page_data: Page::empty(),
            });
            return None;
        }

        debug!(%facet, page, %epoch, sub_queries = queries.len(), "Fetch issued");
        Some(FetchRequest {
            epoch,
            facet,
            page,
            queries,
        })
    }

    /// Merge an outcome into its facet. Outcomes from an older epoch are
    /// discarded; returns whether anything changed.
    pub fn complete(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.epoch != self.epoch {
            debug!(
                facet = %outcome.facet,
                stale = %outcome.epoch,
                current = %self.epoch,
                "Dropping stale response"
            );
            return false;
        }

        let action = match outcome.result {
            Ok(page_data) => FacetAction::PageLoaded {
                page: outcome.page,
                page_data,
            },
            Err(error) => {
                warn!(facet = %outcome.facet, page = outcome.page, "{}", error);
                FacetAction::LoadFailed {
                    page: outcome.page,
                    error,
                }
            }
        };
        self.facets[outcome.facet.index()].reduce(action)
    }

    /// Derive the render model for the current state
    pub fn view(&self) -> AggregateView {
        AggregateView::derive(self)
    }
}

/// Run all list queries of a request concurrently and fold them into one
/// page. Any failing sub-query fails the whole page.
pub async fn execute<A>(api: &A, request: FetchRequest) -> FetchOutcome
where
    A: CollectionApi + ?Sized,
{
    let FetchRequest {
        epoch,
        facet,
        page,
        queries,
    } = request;

    let result = try_join_all(queries.iter().map(|query| api.list(query)))
        .await
        .map(combine)
        .map_err(|e| FacetError::Network {
            facet,
            message: e.to_string(),
        });

    FetchOutcome {
        epoch,
        facet,
        page,
        result,
    }
}

/// Sub-query pages concatenated in plan order; totals add up, the furthest
/// last page wins.
fn combine(pages: Vec<Page<Record>>) -> Page<Record> {
    pages
        .into_iter()
        .fold(Page::new(Vec::new(), 0, 1), |mut acc, page| {
            acc.data.extend(page.data);
            acc.total += page.total;
            acc.last_page = acc.last_page.max(page.last_page);
            acc
        })
}

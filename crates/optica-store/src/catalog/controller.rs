//! Async driver for the product listing.

use crate::catalog::{CatalogState, Completion, FetchPlan, SentinelTrigger};
use crate::error::StoreError;
use crate::session::SessionState;
use optica_client::StorefrontApi;
use optica_commerce::catalog::{ProductFilters, ProductQuery, SortBy, SortOrder, SortPreset};

/// Drives [`CatalogState`] against the API.
///
/// Fetches carry the bearer credential when a session exists; the listing
/// itself works for anonymous visitors.
#[derive(Debug)]
pub struct CatalogController<A> {
    api: A,
    state: CatalogState,
    sentinel: SentinelTrigger,
}

impl<A: StorefrontApi> CatalogController<A> {
    /// Create a controller with the default query.
    pub fn new(api: A) -> Self {
        Self::with_query(api, ProductQuery::new())
    }

    /// Create a controller with a custom initial query.
    pub fn with_query(api: A, query: ProductQuery) -> Self {
        Self {
            api,
            state: CatalogState::with_query(query),
            sentinel: SentinelTrigger::new(),
        }
    }

    /// The listing state, for rendering.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Initial load on mount.
    pub async fn mount(&mut self, session: &SessionState) -> Result<(), StoreError> {
        self.reset(session).await
    }

    /// Refetch page 1 of the current query, discarding accumulated
    /// results.
    pub async fn reset(&mut self, session: &SessionState) -> Result<(), StoreError> {
        let plan = self.state.begin_reset();
        self.run(plan, session).await
    }

    /// Load the next page. Returns `false` without issuing a request when
    /// there is nothing to load or a fetch is already in flight.
    pub async fn load_more(&mut self, session: &SessionState) -> Result<bool, StoreError> {
        match self.state.begin_load_more() {
            Some(plan) => self.run(plan, session).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Reset with optional filter and sort overrides merged in a single
    /// transition, so only one fetch is issued.
    pub async fn reset_with(
        &mut self,
        session: &SessionState,
        filters: Option<ProductFilters>,
        sort: Option<(SortBy, SortOrder)>,
    ) -> Result<(), StoreError> {
        let plan = self.state.reset_with(filters, sort);
        self.run(plan, session).await
    }

    /// Merge a filter edit and refetch from page 1.
    pub async fn apply_filters(
        &mut self,
        session: &SessionState,
        edit: impl FnOnce(&mut ProductFilters),
    ) -> Result<(), StoreError> {
        let plan = self.state.apply_filters(edit);
        self.run(plan, session).await
    }

    /// Replace the filter set and refetch from page 1.
    pub async fn set_filters(
        &mut self,
        session: &SessionState,
        filters: ProductFilters,
    ) -> Result<(), StoreError> {
        let plan = self.state.set_filters(filters);
        self.run(plan, session).await
    }

    /// Restore all-empty filters and the default sort, then refetch.
    pub async fn clear_filters(&mut self, session: &SessionState) -> Result<(), StoreError> {
        let plan = self.state.clear_filters();
        self.run(plan, session).await
    }

    /// Change the sort and refetch from page 1.
    pub async fn set_sort(
        &mut self,
        session: &SessionState,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<(), StoreError> {
        let plan = self.state.set_sort(sort_by, sort_order);
        self.run(plan, session).await
    }

    /// Apply one of the dropdown sort presets.
    pub async fn set_sort_preset(
        &mut self,
        session: &SessionState,
        preset: SortPreset,
    ) -> Result<(), StoreError> {
        let (sort_by, sort_order) = preset.sort();
        self.set_sort(session, sort_by, sort_order).await
    }

    /// Submit a search term and refetch from page 1.
    pub async fn search(
        &mut self,
        session: &SessionState,
        term: impl Into<String>,
    ) -> Result<(), StoreError> {
        let plan = self.state.set_search(term);
        self.run(plan, session).await
    }

    /// Report sentinel visibility from the view. Returns `true` when the
    /// report triggered a continuation fetch.
    pub async fn on_sentinel(
        &mut self,
        session: &SessionState,
        visible: bool,
    ) -> Result<bool, StoreError> {
        let fire = self.sentinel.observe(
            visible,
            self.state.has_more(),
            self.state.is_loading(),
            self.state.len(),
        );
        if !fire {
            return Ok(false);
        }
        self.load_more(session).await
    }

    async fn run(&mut self, plan: FetchPlan, session: &SessionState) -> Result<(), StoreError> {
        tracing::debug!(page = plan.query.page, kind = ?plan.kind, "fetching products");
        let result = self.api.fetch_products(&plan.query, session.token()).await;
        match self.state.complete(plan.token, result) {
            Ok(Completion::Applied) | Ok(Completion::Stale) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "product fetch failed");
                Err(err.into())
            }
        }
    }
}

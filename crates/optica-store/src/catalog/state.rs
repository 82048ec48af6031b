//! Catalog listing state machine.

use optica_client::ApiError;
use optica_commerce::catalog::{
    Product, ProductFilters, ProductPage, ProductQuery, SortBy, SortOrder,
};

/// Token tying a fetch to the query state that issued it.
///
/// Every reset advances the generation; a completion whose token no longer
/// matches belongs to a superseded query and is discarded, so a slow page
/// can never merge into results it was not fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// What a planned fetch will do with its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Replace the result set (page 1 of a new query).
    Reset,
    /// Append the next page to the result set.
    Append,
}

/// A planned fetch: the query to send and the token to complete with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Completion token.
    pub token: FetchToken,
    /// The query to issue.
    pub query: ProductQuery,
    /// Replace or append.
    pub kind: FetchKind,
}

/// How a completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The page was merged into the result set.
    Applied,
    /// The fetch was superseded; its result was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: FetchToken,
    kind: FetchKind,
    /// Page number to commit on success.
    page: i64,
}

/// State machine for the product listing.
///
/// Holds the client-owned query and the server-fed result set. All
/// transitions are synchronous; the async driver issues the planned fetch
/// and feeds the outcome back through [`complete`](Self::complete).
#[derive(Debug)]
pub struct CatalogState {
    query: ProductQuery,
    products: Vec<Product>,
    total_products: i64,
    has_more: bool,
    generation: u64,
    pending: Option<Pending>,
}

impl CatalogState {
    /// Create state for the default query (page 1, default sort, no
    /// filters). No fetch is planned until the first `begin_reset`.
    pub fn new() -> Self {
        Self::with_query(ProductQuery::new())
    }

    /// Create state with a custom initial query.
    pub fn with_query(query: ProductQuery) -> Self {
        Self {
            query: query.with_page(1),
            products: Vec::new(),
            total_products: 0,
            has_more: true,
            generation: 0,
            pending: None,
        }
    }

    /// Plan a reset fetch.
    ///
    /// Postconditions: `page == 1`, the result set is empty, a reset fetch
    /// is in flight under a fresh generation. Any previously planned fetch
    /// is thereby superseded: its completion will be reported [`Completion::Stale`].
    pub fn begin_reset(&mut self) -> FetchPlan {
        self.generation += 1;
        self.query.page = 1;
        self.products.clear();
        self.total_products = 0;
        self.has_more = true;

        let token = FetchToken(self.generation);
        self.pending = Some(Pending {
            token,
            kind: FetchKind::Reset,
            page: 1,
        });
        FetchPlan {
            token,
            query: self.query.clone(),
            kind: FetchKind::Reset,
        }
    }

    /// Merge optional filter and sort overrides in one transition, then
    /// plan a reset.
    pub fn reset_with(
        &mut self,
        filters: Option<ProductFilters>,
        sort: Option<(SortBy, SortOrder)>,
    ) -> FetchPlan {
        if let Some(filters) = filters {
            self.query.filters = filters;
        }
        if let Some((sort_by, sort_order)) = sort {
            self.query.sort_by = sort_by;
            self.query.sort_order = sort_order;
        }
        self.begin_reset()
    }

    /// Plan a continuation fetch for the next page.
    ///
    /// Returns `None`, leaving the page number untouched, when there is
    /// nothing more to load or a fetch is already in flight.
    pub fn begin_load_more(&mut self) -> Option<FetchPlan> {
        if !self.has_more || self.pending.is_some() {
            return None;
        }

        let next_page = self.query.page + 1;
        let token = FetchToken(self.generation);
        self.pending = Some(Pending {
            token,
            kind: FetchKind::Append,
            page: next_page,
        });
        Some(FetchPlan {
            token,
            query: self.query.clone().with_page(next_page),
            kind: FetchKind::Append,
        })
    }

    /// Feed a fetch outcome back into the state.
    ///
    /// A completion from a superseded generation, success or failure, is
    /// discarded outright and the current state is untouched. A current
    /// failure clears the in-flight flag, leaves the result set and page
    /// as they were, and hands the error back for the view to surface.
    pub fn complete(
        &mut self,
        token: FetchToken,
        result: Result<ProductPage, ApiError>,
    ) -> Result<Completion, ApiError> {
        let pending = match self.pending {
            Some(pending) if pending.token == token && token.0 == self.generation => pending,
            _ => {
                tracing::debug!(token = token.0, "discarding stale fetch completion");
                return Ok(Completion::Stale);
            }
        };
        self.pending = None;

        let page = result?;
        match pending.kind {
            FetchKind::Reset => self.products = page.products,
            FetchKind::Append => self.products.extend(page.products),
        }
        self.query.page = pending.page;
        self.total_products = page.total_products;
        self.has_more = page.current_page < page.total_pages;
        tracing::debug!(
            page = self.query.page,
            loaded = self.products.len(),
            total = self.total_products,
            has_more = self.has_more,
            "merged product page"
        );
        Ok(Completion::Applied)
    }

    /// Edit the filters in place, then plan a reset.
    pub fn apply_filters(&mut self, edit: impl FnOnce(&mut ProductFilters)) -> FetchPlan {
        edit(&mut self.query.filters);
        self.begin_reset()
    }

    /// Replace the filter set, then plan a reset.
    pub fn set_filters(&mut self, filters: ProductFilters) -> FetchPlan {
        self.query.filters = filters;
        self.begin_reset()
    }

    /// Change the sort, then plan a reset.
    pub fn set_sort(&mut self, sort_by: SortBy, sort_order: SortOrder) -> FetchPlan {
        self.query.sort_by = sort_by;
        self.query.sort_order = sort_order;
        self.begin_reset()
    }

    /// Set the search term, then plan a reset.
    pub fn set_search(&mut self, term: impl Into<String>) -> FetchPlan {
        let term = term.into();
        self.query.filters.search = (!term.is_empty()).then_some(term);
        self.begin_reset()
    }

    /// Restore all-empty filters and the default sort, then plan a reset.
    pub fn clear_filters(&mut self) -> FetchPlan {
        self.query.filters = ProductFilters::new();
        self.query.sort_by = SortBy::default();
        self.query.sort_order = SortOrder::default();
        self.begin_reset()
    }

    /// The accumulated products, in server order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of accumulated products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total matching products as reported by the server.
    pub fn total_products(&self) -> i64 {
        self.total_products
    }

    /// Whether a further page exists.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether any fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether an initial (reset) fetch is in flight. Views show the
    /// skeleton grid for this and a footer spinner for continuations.
    pub fn is_resetting(&self) -> bool {
        matches!(
            self.pending,
            Some(Pending {
                kind: FetchKind::Reset,
                ..
            })
        )
    }

    /// Whether a continuation fetch is in flight.
    pub fn is_loading_more(&self) -> bool {
        matches!(
            self.pending,
            Some(Pending {
                kind: FetchKind::Append,
                ..
            })
        )
    }

    /// The current query.
    pub fn query(&self) -> &ProductQuery {
        &self.query
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optica_commerce::ids::ProductId;
    use optica_commerce::Money;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            product_id: String::new(),
            model_no: format!("model-{id}"),
            frame_color: String::new(),
            frame_size: String::new(),
            frame_width_mm: 0,
            frame_dimensions: String::new(),
            price: Money::new(1000),
            discount_price: Money::new(800),
            discount_percentage: 20,
            images: Vec::new(),
            reviews: Vec::new(),
        }
    }

    fn page(ids: &[&str], current_page: i64, total_pages: i64, total: i64) -> ProductPage {
        ProductPage {
            products: ids.iter().map(|id| product(id)).collect(),
            total_products: total,
            current_page,
            total_pages,
        }
    }

    fn network_err() -> ApiError {
        ApiError::Connection("connection refused".to_string())
    }

    #[test]
    fn test_reset_clears_results_before_completion() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a", "b"], 1, 3, 15))).unwrap();
        assert_eq!(state.len(), 2);

        // The result set empties as soon as the reset is planned, before
        // the new fetch resolves.
        let plan = state.apply_filters(|f| f.frame_color = Some("Black".to_string()));
        assert!(state.is_empty());
        assert_eq!(state.query().page, 1);
        assert!(state.is_resetting());
        assert_eq!(plan.query.page, 1);
    }

    #[test]
    fn test_load_more_appends_in_server_order() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a", "b"], 1, 2, 4))).unwrap();

        let plan = state.begin_load_more().unwrap();
        assert_eq!(plan.query.page, 2);
        state.complete(plan.token, Ok(page(&["c", "d"], 2, 2, 4))).unwrap();

        let ids: Vec<&str> = state.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(state.query().page, 2);
        assert!(!state.has_more());
    }

    #[test]
    fn test_load_more_noop_when_fetch_in_flight() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a"], 1, 3, 9))).unwrap();

        let first = state.begin_load_more();
        assert!(first.is_some());
        // Second back-to-back call while the first is still in flight.
        assert!(state.begin_load_more().is_none());

        // Only one fetch was planned and the page advanced exactly once.
        state
            .complete(first.unwrap().token, Ok(page(&["b"], 2, 3, 9)))
            .unwrap();
        assert_eq!(state.query().page, 2);
    }

    #[test]
    fn test_load_more_noop_when_no_more_pages() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a"], 1, 1, 1))).unwrap();

        assert!(!state.has_more());
        assert!(state.begin_load_more().is_none());
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_reset_supersedes_in_flight_fetch() {
        let mut state = CatalogState::new();
        let stale_plan = state.begin_reset();
        let fresh_plan = state.begin_reset();

        // The superseded response arrives late; it must be a no-op even
        // though it carries data.
        let outcome = state
            .complete(stale_plan.token, Ok(page(&["old"], 1, 1, 1)))
            .unwrap();
        assert_eq!(outcome, Completion::Stale);
        assert!(state.is_empty());
        assert!(state.is_loading());

        let outcome = state
            .complete(fresh_plan.token, Ok(page(&["new"], 1, 1, 1)))
            .unwrap();
        assert_eq!(outcome, Completion::Applied);
        assert_eq!(state.products()[0].id.as_str(), "new");
    }

    #[test]
    fn test_reset_supersedes_in_flight_load_more() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a"], 1, 3, 9))).unwrap();

        let append_plan = state.begin_load_more().unwrap();
        let reset_plan = state.begin_reset();

        let outcome = state
            .complete(append_plan.token, Ok(page(&["b"], 2, 3, 9)))
            .unwrap();
        assert_eq!(outcome, Completion::Stale);

        state.complete(reset_plan.token, Ok(page(&["z"], 1, 1, 1))).unwrap();
        let ids: Vec<&str> = state.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["z"]);
    }

    #[test]
    fn test_stale_error_is_swallowed() {
        let mut state = CatalogState::new();
        let stale_plan = state.begin_reset();
        let fresh_plan = state.begin_reset();

        let outcome = state.complete(stale_plan.token, Err(network_err())).unwrap();
        assert_eq!(outcome, Completion::Stale);
        assert!(state.is_loading());

        state.complete(fresh_plan.token, Ok(page(&["a"], 1, 1, 1))).unwrap();
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_failed_load_more_preserves_results_and_page() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a", "b"], 1, 3, 9))).unwrap();

        let plan = state.begin_load_more().unwrap();
        let err = state.complete(plan.token, Err(network_err()));
        assert!(err.is_err());

        assert_eq!(state.len(), 2);
        assert_eq!(state.query().page, 1);
        assert!(!state.is_loading());
        assert!(state.has_more());
        // The next attempt plans page 2 again.
        assert_eq!(state.begin_load_more().unwrap().query.page, 2);
    }

    #[test]
    fn test_zero_matches_leaves_empty_result_without_more() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&[], 1, 0, 0))).unwrap();

        assert!(state.is_empty());
        assert!(!state.has_more());
        assert_eq!(state.total_products(), 0);
    }

    #[test]
    fn test_clear_filters_restores_defaults() {
        let mut state = CatalogState::new();
        state.apply_filters(|f| f.frame_color = Some("Black".to_string()));
        let plan = state.set_sort(SortBy::DiscountPrice, SortOrder::Asc);
        state.complete(plan.token, Ok(page(&["a"], 1, 2, 8))).unwrap();

        let plan = state.clear_filters();
        assert!(state.query().filters.is_empty());
        assert_eq!(state.query().sort_by, SortBy::CreatedAt);
        assert_eq!(state.query().sort_order, SortOrder::Desc);
        assert_eq!(state.query().page, 1);
        assert!(state.is_empty());

        // The planned request carries no filter parameters.
        let params = plan.query.to_params();
        assert!(params.iter().all(|(name, _)| {
            matches!(*name, "page" | "limit" | "sortBy" | "sortOrder")
        }));
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut state = CatalogState::new();
        let plan = state.begin_reset();
        state.complete(plan.token, Ok(page(&["a"], 1, 5, 25))).unwrap();
        let plan = state.begin_load_more().unwrap();
        state.complete(plan.token, Ok(page(&["b"], 2, 5, 25))).unwrap();
        assert_eq!(state.query().page, 2);

        state.set_sort(SortBy::DiscountPercentage, SortOrder::Desc);
        assert_eq!(state.query().page, 1);
        assert!(state.is_empty());
    }

    #[test]
    fn test_reset_with_merges_both_overrides_in_one_fetch() {
        let mut state = CatalogState::new();
        let plan = state.reset_with(
            Some(ProductFilters::new().with_frame_color("Gold")),
            Some((SortBy::DiscountPrice, SortOrder::Asc)),
        );

        assert_eq!(plan.query.page, 1);
        assert_eq!(plan.query.sort_by, SortBy::DiscountPrice);
        assert_eq!(
            plan.query.filters.frame_color.as_deref(),
            Some("Gold")
        );
        // One plan, one pending fetch.
        assert!(state.begin_load_more().is_none());
    }

    #[test]
    fn test_search_term_empty_clears_filter() {
        let mut state = CatalogState::new();
        state.set_search("aviator");
        assert_eq!(state.query().filters.search.as_deref(), Some("aviator"));
        state.set_search("");
        assert_eq!(state.query().filters.search, None);
    }
}

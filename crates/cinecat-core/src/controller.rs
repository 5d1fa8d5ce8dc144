//! Incremental movie list loading.
//!
//! [`ListController`] owns the accumulated result list, the pagination
//! cursor, the committed filter criteria and the loading/error flags.
//! A load is split into [`ListController::begin`], [`fetch_page`] and
//! [`ListController::finish`] so an event loop can run the fetch on a task
//! and hand the result back; [`ListController::load`] does all three inline.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use cinecat_api::tmdb::{CatalogApi, Movie, Page};

use crate::criteria::{CatalogQuery, FilterCriteria, GenreFilter};

/// User-facing message shown when a list page fails to load.
pub const LIST_ERROR_MESSAGE: &str = "failed to load popular movies";

/// Observable list state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState {
    /// Movies in arrival order.
    pub items: Vec<Movie>,
    /// Last loaded page (0 before the first load).
    pub page: u32,
    /// Total pages reported by the server (at least 1).
    pub total_pages: u32,
    /// A request is in flight.
    pub loading: bool,
    /// User-facing error of the last failed load.
    pub error: Option<String>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 1,
            loading: false,
            error: None,
        }
    }
}

/// Where the list is in its `Idle → Loading → {Loaded, Failed}` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing loaded since the last reset.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded,
    /// The last request failed.
    Failed,
}

impl LoadState {
    /// Whether the server has pages beyond the last loaded one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Current phase of the load cycle.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        if self.loading {
            LoadPhase::Loading
        } else if self.error.is_some() {
            LoadPhase::Failed
        } else if self.page == 0 {
            LoadPhase::Idle
        } else {
            LoadPhase::Loaded
        }
    }
}

/// Parameters of one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Page to fetch (1-based).
    pub page: u32,
    /// Criteria in effect for this fetch.
    pub criteria: FilterCriteria,
}

impl PageRequest {
    /// Endpoint this request resolves to.
    #[must_use]
    pub fn query(&self) -> CatalogQuery {
        self.criteria.query()
    }
}

/// Handle for an issued load.
///
/// Carries the generation the load was issued under; [`ListController::finish`]
/// applies the result only if that generation is still current.
#[derive(Debug)]
#[must_use = "pass the ticket to `ListController::finish` to release the loading flag"]
pub struct LoadTicket {
    generation: u64,
    request: PageRequest,
}

impl LoadTicket {
    /// The request to execute.
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Generation this load was issued under.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`ListController::finish`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Results were applied.
    Loaded,
    /// The error message was set; items are untouched.
    Failed,
    /// A newer load or a criteria change superseded this one; nothing changed.
    Stale,
}

/// Incremental list loading controller.
#[derive(Debug, Default)]
pub struct ListController {
    state: LoadState,
    criteria: FilterCriteria,
    generation: u64,
    last_request: Option<PageRequest>,
}

impl ListController {
    /// Creates an idle controller with default criteria (popular movies).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle controller with the given committed criteria.
    #[must_use]
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Current list state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Committed criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Current generation token.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Commits new criteria.
    ///
    /// A change resets the list to its idle state and invalidates any load in
    /// flight. Returns `false` (and does nothing) when the criteria are equal
    /// to the committed ones.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        tracing::debug!(
            search = %criteria.search_text,
            genre = %criteria.genre,
            "list criteria changed"
        );
        self.criteria = criteria;
        self.generation = self.generation.wrapping_add(1);
        self.state = LoadState::default();
        self.last_request = None;
        true
    }

    /// Commits new search text, keeping the genre filter.
    pub fn set_search_text(&mut self, search_text: impl Into<String>) -> bool {
        let criteria = FilterCriteria::new(search_text, self.criteria.genre);
        self.set_criteria(criteria)
    }

    /// Commits a new genre filter, keeping the search text.
    pub fn set_genre(&mut self, genre: GenreFilter) -> bool {
        let criteria = FilterCriteria::new(self.criteria.search_text.clone(), genre);
        self.set_criteria(criteria)
    }

    /// Issues a load of `page` under `criteria_override` or the committed
    /// criteria.
    ///
    /// Sets `loading` and clears the error. Gating on `loading` is the
    /// caller's job; issuing while a load is in flight supersedes it.
    pub fn begin(&mut self, page: u32, criteria_override: Option<FilterCriteria>) -> LoadTicket {
        if self.state.loading {
            tracing::debug!(page, "superseding in-flight load");
        }
        let criteria = criteria_override.unwrap_or_else(|| self.criteria.clone());
        let request = PageRequest { page, criteria };

        self.generation = self.generation.wrapping_add(1);
        self.state.loading = true;
        self.state.error = None;
        self.last_request = Some(request.clone());

        LoadTicket {
            generation: self.generation,
            request,
        }
    }

    /// Issues a load of the page after the last loaded one.
    ///
    /// Returns `None` while loading or once every page has been loaded.
    pub fn begin_next(&mut self) -> Option<LoadTicket> {
        if self.state.loading || !self.state.has_more() {
            return None;
        }
        let next = self.state.page.saturating_add(1);
        Some(self.begin(next, None))
    }

    /// Re-issues the last load with the same parameters.
    ///
    /// Returns `None` if nothing was loaded since the last criteria change.
    pub fn begin_retry(&mut self) -> Option<LoadTicket> {
        let request = self.last_request.clone()?;
        Some(self.begin(request.page, Some(request.criteria)))
    }

    /// Applies the result of an issued load.
    ///
    /// Page 1 replaces the list; later pages append in arrival order. A
    /// failure sets the error message and leaves items and pagination as
    /// they were. Results from a superseded ticket are discarded.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Page<Movie>>) -> LoadOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale page response"
            );
            return LoadOutcome::Stale;
        }

        self.state.loading = false;

        match result {
            Ok(page) => {
                let total_pages = page.total_pages.max(1);
                let received = page.results.len();
                if ticket.request.page == 1 {
                    self.state.items = page.results;
                } else {
                    self.state.items.extend(page.results);
                }
                self.state.total_pages = total_pages;
                self.state.page = page.page.clamp(1, total_pages);
                self.state.error = None;
                tracing::debug!(
                    page = self.state.page,
                    total_pages,
                    received,
                    items = self.state.items.len(),
                    "page loaded"
                );
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::warn!(page = ticket.request.page, error = %err, "failed to load movie page");
                self.state.error = Some(String::from(LIST_ERROR_MESSAGE));
                LoadOutcome::Failed
            }
        }
    }

    /// Loads `page` inline: issue, fetch, apply.
    pub async fn load<A: CatalogApi>(
        &mut self,
        api: &A,
        page: u32,
        criteria_override: Option<FilterCriteria>,
    ) -> LoadOutcome {
        let ticket = self.begin(page, criteria_override);
        let result = fetch_page(api, ticket.request()).await;
        self.finish(ticket, result)
    }

    /// Loads the next page inline. See [`Self::begin_next`].
    pub async fn load_next<A: CatalogApi>(&mut self, api: &A) -> Option<LoadOutcome> {
        let ticket = self.begin_next()?;
        let result = fetch_page(api, ticket.request()).await;
        Some(self.finish(ticket, result))
    }

    /// Retries the last load inline. See [`Self::begin_retry`].
    pub async fn retry<A: CatalogApi>(&mut self, api: &A) -> Option<LoadOutcome> {
        let ticket = self.begin_retry()?;
        let result = fetch_page(api, ticket.request()).await;
        Some(self.finish(ticket, result))
    }
}

/// Fetches the page described by `request` from the matching endpoint.
///
/// # Errors
///
/// Returns the catalog client's error unchanged.
pub async fn fetch_page<A: CatalogApi>(api: &A, request: &PageRequest) -> Result<Page<Movie>> {
    match request.query() {
        CatalogQuery::Popular => api.popular_movies(request.page).await,
        CatalogQuery::Search(text) => api.search_movies(&text, request.page).await,
        CatalogQuery::Genre(genre_id) => api.discover_movies(genre_id, request.page).await,
    }
}

//! Local view of one page of a remote resource collection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Outcome;
use crate::domain::entities::{
    DEFAULT_PAGE_LIMIT, ListQuery, Pagination, Resource, ResourceFilters, ResourceId,
    ResourceInput, ResourcePage,
};
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Which listing endpoint a store reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    /// The logged-in user's own resources.
    Owned,
    /// Resources any user marked public.
    Public,
}

/// Snapshot of everything a consumer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub resources: Vec<Resource>,
    pub loading: bool,
    pub pagination: Pagination,
    pub filters: ResourceFilters,
    /// Message of the last failed fetch, cleared by the next successful one.
    pub error: Option<String>,
}

impl StoreState {
    fn new(limit: u32) -> Self {
        Self {
            resources: Vec::new(),
            loading: false,
            pagination: Pagination::new(limit),
            filters: ResourceFilters::default(),
            error: None,
        }
    }
}

/// Owns the current page of the current filter and keeps it in sync with
/// the server.
///
/// Consumers read [`StoreState`] snapshots (or [`subscribe`](Self::subscribe)
/// to changes) and call operations; they never edit the list themselves.
/// After every successful mutation the store refetches the current page
/// instead of patching its local copy.
///
/// # Overlapping fetches
///
/// Each fetch draws a ticket from a monotonically increasing counter. A
/// response is applied only if its ticket is still the latest one issued;
/// responses overtaken by a newer fetch are dropped, so the most recently
/// *issued* fetch always wins.
///
/// # Errors
///
/// Mutations return [`Outcome`] and never an error. [`fetch`](Self::fetch)
/// returns nothing: failures are logged, recorded in [`StoreState::error`]
/// and leave the previous resources and pagination intact.
pub struct ResourceStore<R: ResourceRepository> {
    repository: Arc<R>,
    scope: ResourceScope,
    state: watch::Sender<StoreState>,
    sequence: AtomicU64,
}

impl<R: ResourceRepository> ResourceStore<R> {
    /// Store over the caller's own resources with the default page size.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_scope(repository, ResourceScope::Owned, DEFAULT_PAGE_LIMIT)
    }

    /// Store over public resources.
    pub fn public(repository: Arc<R>, limit: u32) -> Self {
        Self::with_scope(repository, ResourceScope::Public, limit)
    }

    pub fn with_scope(repository: Arc<R>, scope: ResourceScope, limit: u32) -> Self {
        let (state, _) = watch::channel(StoreState::new(limit.max(1)));
        Self {
            repository,
            scope,
            state,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn scope(&self) -> ResourceScope {
        self.scope
    }

    /// Current state snapshot.
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Looks up a resource on the current page.
    pub fn find(&self, id: ResourceId) -> Option<Resource> {
        self.state
            .borrow()
            .resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Finds a resource on the current page, or walks the pages of the stored
    /// filters from the first one until it turns up.
    ///
    /// Stops at the last page or at the first failed fetch.
    pub async fn locate(&self, id: ResourceId) -> Option<Resource> {
        if let Some(found) = self.find(id) {
            return Some(found);
        }

        let mut page = 1;
        loop {
            self.change_page(page).await;
            if let Some(found) = self.find(id) {
                return Some(found);
            }

            let state = self.state();
            if state.error.is_some() || !state.pagination.has_next() {
                debug!(%id, pages = state.pagination.pages, "Resource not found in listing");
                return None;
            }
            page += 1;
        }
    }

    /// Loads one page.
    ///
    /// `filters` defaults to the stored filters and `page` to 1. Stored
    /// filters are not changed; use [`search`](Self::search) for that. On
    /// success `resources` and `pagination` are replaced wholesale.
    pub async fn fetch(&self, filters: Option<ResourceFilters>, page: Option<u32>) {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let (filters, limit) = {
            let current = self.state.borrow();
            (
                filters.unwrap_or_else(|| current.filters.clone()),
                current.pagination.limit,
            )
        };
        let query = ListQuery::new(&filters, page.unwrap_or(1), limit);

        self.state.send_modify(|s| s.loading = true);
        let guard = LoadingGuard {
            state: &self.state,
            sequence: &self.sequence,
            ticket,
        };

        let result = self.list(&query).await;

        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(ticket, page = query.page, "Discarding superseded resource page");
            return;
        }
        guard.disarm();

        match result {
            Ok(page) => {
                debug!(
                    page = page.page,
                    total = page.total,
                    count = page.resources.len(),
                    "Resource page loaded"
                );
                self.state.send_modify(|s| {
                    s.pagination = page.pagination();
                    s.resources = page.resources;
                    s.loading = false;
                    s.error = None;
                });
            }
            Err(e) => {
                warn!(error = %e, page = query.page, "Failed to fetch resources");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.display_message("Failed to fetch resources"));
                });
            }
        }
    }

    /// Replaces the stored filters and loads their first page.
    pub async fn search(&self, filters: ResourceFilters) {
        self.state.send_modify(|s| s.filters = filters.clone());
        self.fetch(Some(filters), Some(1)).await;
    }

    /// Loads another page of the stored filters.
    pub async fn change_page(&self, page: u32) {
        self.fetch(None, Some(page)).await;
    }

    /// Reloads the current page of the stored filters.
    pub async fn refresh(&self) {
        let page = self.state.borrow().pagination.page;
        self.fetch(None, Some(page)).await;
    }

    /// Validates and creates a resource, then refreshes the current page.
    pub async fn create(&self, input: ResourceInput) -> Outcome<Resource> {
        if let Err(e) = input.validate() {
            return Outcome::Failure(e.display_message("Failed to create resource"));
        }

        match self.repository.create(&input).await {
            Ok(created) => {
                debug!(id = %created.id, "Resource created");
                self.refresh().await;
                Outcome::Success(created)
            }
            Err(e) => Outcome::Failure(e.display_message("Failed to create resource")),
        }
    }

    /// Validates and updates a resource, then refreshes the current page.
    pub async fn update(&self, id: ResourceId, input: ResourceInput) -> Outcome<Resource> {
        if let Err(e) = input.validate() {
            return Outcome::Failure(e.display_message("Failed to update resource"));
        }

        match self.repository.update(id, &input).await {
            Ok(updated) => {
                debug!(%id, "Resource updated");
                self.refresh().await;
                Outcome::Success(updated)
            }
            Err(e) => Outcome::Failure(e.display_message("Failed to update resource")),
        }
    }

    /// Deletes a resource, then refreshes the current page.
    pub async fn delete(&self, id: ResourceId) -> Outcome<()> {
        match self.repository.delete(id).await {
            Ok(()) => {
                debug!(%id, "Resource deleted");
                self.refresh().await;
                Outcome::Success(())
            }
            Err(e) => Outcome::Failure(e.display_message("Failed to delete resource")),
        }
    }

    /// Records a visit. The click counter changes server-side only; the local
    /// page is not refreshed.
    pub async fn record_visit(&self, id: ResourceId) -> Outcome<()> {
        match self.repository.record_click(id).await {
            Ok(()) => Outcome::Success(()),
            Err(e) => {
                warn!(error = %e, %id, "Failed to track click");
                Outcome::Failure(e.display_message("Failed to track click"))
            }
        }
    }

    async fn list(&self, query: &ListQuery) -> Result<ResourcePage, AppError> {
        match self.scope {
            ResourceScope::Owned => self.repository.list(query).await,
            ResourceScope::Public => self.repository.list_public(query).await,
        }
    }
}

/// Clears `loading` when a fetch is dropped before its response arrives,
/// provided no newer fetch has started since.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreState>,
    sequence: &'a AtomicU64,
    ticket: u64,
}

impl LoadingGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.sequence.load(Ordering::SeqCst) == self.ticket {
            debug!(ticket = self.ticket, "Fetch dropped before completion");
            self.state.send_modify(|s| s.loading = false);
        }
    }
}

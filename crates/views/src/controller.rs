//! The generic list view controller.
//!
//! One instance drives one list view. It owns the loaded page, the
//! persisted preferences, and the transient search term; every criteria
//! change resets to the first page, persists the preferences, and
//! issues exactly one fetch. Responses are applied through a generation
//! check so an out-of-order reply never overwrites newer data.

use std::collections::HashMap;
use std::sync::Arc;

use opsdesk_client::query::clamp_page_size;
use opsdesk_client::{ApiError, ListQuery, Page};
use opsdesk_core::{now_ms, EpochMillis, SortDirection};
use opsdesk_store::KvStore;

use crate::entities::ListEntity;
use crate::error::ViewError;
use crate::fetcher::PageFetcher;
use crate::notice::Notice;
use crate::prefs::{ListPrefs, DEFAULT_SORT_FIELD};
use crate::tabs::{self, ALL_TAB};

/// What became of one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied; content and counters were replaced.
    Applied,
    /// A newer request was issued before this response arrived; the
    /// response was discarded.
    Stale,
    /// The request failed; a notice was surfaced and prior data kept.
    Failed,
    /// No request was issued (out-of-range page, unknown tab).
    Skipped,
}

/// List view state for one entity kind.
pub struct ListController<E: ListEntity> {
    fetcher: Arc<dyn PageFetcher<E>>,
    store: Arc<dyn KvStore>,
    prefs: ListPrefs,
    /// Debounced search input. Transient: a fresh view starts blank.
    search_term: String,
    page: Page<E>,
    current_page: u64,
    loading: bool,
    /// Generation of the most recently issued request. Only a response
    /// carrying this value may be applied.
    generation: u64,
    notice: Option<Notice>,
}

impl<E: ListEntity> ListController<E> {
    /// Build a controller, restoring persisted preferences. No request
    /// is issued; call [`reload`](Self::reload) for the initial load.
    pub fn new(fetcher: Arc<dyn PageFetcher<E>>, store: Arc<dyn KvStore>) -> Result<Self, ViewError> {
        let mut prefs = ListPrefs::load(store.as_ref(), E::VIEW)?;
        if tabs::find(E::tabs(), &prefs.active_tab).is_none() {
            tracing::warn!(
                view = E::VIEW,
                tab = %prefs.active_tab,
                "Stored tab no longer exists; falling back to 'all'"
            );
            prefs.active_tab = ALL_TAB.to_string();
        }

        Ok(Self {
            fetcher,
            store,
            prefs,
            search_term: String::new(),
            page: Page::empty(),
            current_page: 0,
            loading: false,
            generation: 0,
            notice: None,
        })
    }

    // -----------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------

    /// Issue a load for the current criteria and apply its result.
    pub async fn reload(&mut self) -> LoadOutcome {
        let (generation, query) = self.begin_load();
        let result = self.fetcher.fetch_page(&query).await;
        self.complete_load(generation, result)
    }

    /// Compose the query for the current criteria and register a new
    /// request generation. Split from [`complete_load`](Self::complete_load)
    /// so a caller managing its own request futures can interleave
    /// several in-flight loads.
    pub fn begin_load(&mut self) -> (u64, ListQuery) {
        self.generation += 1;
        self.loading = true;
        let query = self.compose_query();
        tracing::debug!(
            view = E::VIEW,
            generation = self.generation,
            page = self.current_page,
            "Issuing list request"
        );
        (self.generation, query)
    }

    /// Apply a fetch result for the given generation. A response is
    /// applied only if its generation is still the latest; anything
    /// older is discarded, so out-of-order replies converge on the
    /// last-issued request.
    pub fn complete_load(
        &mut self,
        generation: u64,
        result: Result<Page<E>, ApiError>,
    ) -> LoadOutcome {
        if generation != self.generation {
            tracing::debug!(
                view = E::VIEW,
                generation,
                latest = self.generation,
                "Discarding stale list response"
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                // A shrunken result can leave the recorded index past
                // the end; clamp it back into range.
                if page.total_pages == 0 {
                    self.current_page = 0;
                } else if self.current_page >= page.total_pages {
                    self.current_page = page.total_pages - 1;
                }
                self.page = page;
                LoadOutcome::Applied
            }
            Err(error) => {
                tracing::warn!(view = E::VIEW, error = %error, "List request failed");
                // Keep whatever was on screen; a failed refresh must
                // not blank out data the user is looking at.
                self.notice = Some(Notice::error(error.to_string(), now_ms()));
                LoadOutcome::Failed
            }
        }
    }

    /// The query for the current page, preferences, tab, advanced
    /// filters, and search term. Tab-derived pairs go in first so
    /// advanced fields override them.
    fn compose_query(&self) -> ListQuery {
        let mut query = self.prefs.base_query(self.current_page);
        if let Some(tab) = tabs::find(E::tabs(), &self.prefs.active_tab) {
            if let Some((field, value)) = tab.filter {
                query = query.with_filter(field, value);
            }
        }
        for (field, value) in &self.prefs.advanced {
            query = query.with_filter(field.clone(), value.clone());
        }
        if !self.search_term.is_empty() {
            query = query.with_filter("searchTerm", self.search_term.clone());
        }
        query
    }

    // -----------------------------------------------------------------
    // Criteria changes
    // -----------------------------------------------------------------

    /// Switch the active tab, reset to the first page, and reload.
    /// Selecting the already-active tab reloads as well; an unknown tab
    /// is ignored.
    pub async fn set_active_tab(&mut self, tab_id: &str) -> Result<LoadOutcome, ViewError> {
        if tabs::find(E::tabs(), tab_id).is_none() {
            tracing::warn!(view = E::VIEW, tab = tab_id, "Ignoring unknown tab");
            return Ok(LoadOutcome::Skipped);
        }
        self.prefs.active_tab = tab_id.to_string();
        self.persist()?;
        self.current_page = 0;
        Ok(self.reload().await)
    }

    /// Change the page size, reset to the first page, and reload. The
    /// size is clamped to the server's accepted range.
    pub async fn set_page_size(&mut self, size: u64) -> Result<LoadOutcome, ViewError> {
        self.prefs.page_size = clamp_page_size(size);
        self.persist()?;
        self.current_page = 0;
        Ok(self.reload().await)
    }

    /// Change the sort, reset to the first page, and reload.
    pub async fn set_sort(
        &mut self,
        field: &str,
        direction: SortDirection,
    ) -> Result<LoadOutcome, ViewError> {
        self.prefs.sort_field = field.to_string();
        self.prefs.sort_direction = direction;
        self.persist()?;
        self.current_page = 0;
        Ok(self.reload().await)
    }

    /// Replace the advanced filter fields, reset to the first page, and
    /// reload. Blank values are dropped rather than stored.
    pub async fn apply_filters(
        &mut self,
        filters: HashMap<String, String>,
    ) -> Result<LoadOutcome, ViewError> {
        self.prefs.advanced = filters
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        self.persist()?;
        self.current_page = 0;
        Ok(self.reload().await)
    }

    /// Reset tab, advanced filters, search term, and sort to their
    /// defaults, then reload from the first page. Page size and column
    /// visibility are kept.
    pub async fn clear_filters(&mut self) -> Result<LoadOutcome, ViewError> {
        self.prefs.active_tab = ALL_TAB.to_string();
        self.prefs.advanced.clear();
        self.prefs.sort_field = DEFAULT_SORT_FIELD.to_string();
        self.prefs.sort_direction = SortDirection::Desc;
        self.search_term.clear();
        self.persist()?;
        self.current_page = 0;
        Ok(self.reload().await)
    }

    /// Apply a search term (already debounced by the caller) and reload
    /// from the first page. The term is not persisted.
    pub async fn set_search_term(&mut self, term: &str) -> LoadOutcome {
        self.search_term = term.trim().to_string();
        self.current_page = 0;
        self.reload().await
    }

    // -----------------------------------------------------------------
    // Page navigation
    // -----------------------------------------------------------------

    /// Jump to a page and reload it. Out-of-range targets, including
    /// negative ones, are ignored.
    pub async fn go_to_page(&mut self, page: i64) -> LoadOutcome {
        if page < 0 || page as u64 >= self.page.total_pages {
            tracing::debug!(view = E::VIEW, page, "Ignoring out-of-range page");
            return LoadOutcome::Skipped;
        }
        self.current_page = page as u64;
        self.reload().await
    }

    /// Advance one page, if there is one.
    pub async fn next_page(&mut self) -> LoadOutcome {
        if self.current_page + 1 >= self.page.total_pages {
            return LoadOutcome::Skipped;
        }
        self.current_page += 1;
        self.reload().await
    }

    /// Go back one page, if there is one.
    pub async fn previous_page(&mut self) -> LoadOutcome {
        if self.current_page == 0 {
            return LoadOutcome::Skipped;
        }
        self.current_page -= 1;
        self.reload().await
    }

    // -----------------------------------------------------------------
    // Columns
    // -----------------------------------------------------------------

    /// Flip a column's visibility and persist the preference. Display
    /// only; no reload.
    pub fn toggle_column(&mut self, column: &str) -> Result<(), ViewError> {
        let visible = self.prefs.is_column_visible(column);
        self.prefs.columns.insert(column.to_string(), !visible);
        self.persist()
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.prefs.is_column_visible(column)
    }

    // -----------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------

    /// How many rows of the loaded page fall under a tab. The "all" tab
    /// counts the whole page; an unknown tab counts zero.
    ///
    /// This is a tally over the visible page only, not a global count
    /// across the collection.
    pub fn status_count(&self, tab_id: &str) -> usize {
        let Some(tab) = tabs::find(E::tabs(), tab_id) else {
            return 0;
        };
        match tab.filter {
            None => self.page.len(),
            Some((field, value)) => self
                .page
                .content
                .iter()
                .filter(|entity| entity.matches_filter(field, value))
                .count(),
        }
    }

    /// The loaded rows that pass the client-side backstop for the
    /// active criteria. Server-side filtering is authoritative; this
    /// second pass only hides rows that plainly contradict it.
    pub fn displayed(&self) -> Vec<&E> {
        let filter = self.compose_query().filter;
        self.page
            .content
            .iter()
            .filter(|entity| {
                filter
                    .iter()
                    .all(|(field, value)| entity.matches_filter(field, value))
            })
            .collect()
    }

    // -----------------------------------------------------------------
    // Notices
    // -----------------------------------------------------------------

    /// The current notice, unless it has expired.
    pub fn notice(&self, now: EpochMillis) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired(now))
    }

    /// Drop the notice without waiting for expiry.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn content(&self) -> &[E] {
        &self.page.content
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.page.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.page.total_elements
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_tab(&self) -> &str {
        &self.prefs.active_tab
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn prefs(&self) -> &ListPrefs {
        &self.prefs
    }

    fn persist(&self) -> Result<(), ViewError> {
        self.prefs.save(self.store.as_ref(), E::VIEW)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

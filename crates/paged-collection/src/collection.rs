//! Paged Collection View Model
//!
//! Sans-IO state machine. Callers ask for a [`FetchTicket`], run the request
//! however they like, then hand the outcome back with
//! [`PagedCollection::complete_fetch`]. Only the most recently issued ticket
//! may touch the loaded items; anything older is a stale response and is
//! dropped on arrival.

use log::{debug, warn};

use crate::entity::Entity;
use crate::error::{FetchError, FetchResult};
use crate::page::{Page, PageResult};
use crate::query::{QueryPatch, QueryState};
use crate::stats::{DerivedStats, Selectors};
use crate::visibility::{visible_items, ActorContext, Visible};

/// How a successful page is merged into the loaded items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// New query: the page becomes the whole list
    Replace,
    /// Load more: the page is concatenated after the current items
    Append,
}

/// One issued fetch: the exact window requested and the generation it
/// belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub query: QueryState,
    pub mode: FetchMode,
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Applied,
    Failed(FetchError),
    /// Superseded by a newer query; nothing changed
    Stale,
}

/// A create/update/delete request raised by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum MutationIntent<Id, D> {
    Create { payload: D },
    Update { id: Id, payload: D },
    Delete { id: Id },
}

/// Server-confirmed result of a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T: Entity> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
}

#[derive(Debug, Clone)]
pub struct PagedCollection<T: Entity> {
    query: QueryState,
    result: PageResult<T>,
    generation: u64,
    in_flight: bool,
    error: Option<FetchError>,
    /// Mode of the last fetch if it failed, for [`PagedCollection::retry`]
    failed: Option<FetchMode>,
    mutation_error: Option<FetchError>,
    revision: u64,
}

impl<T: Entity> Default for PagedCollection<T> {
    fn default() -> Self {
        Self::new(QueryState::default())
    }
}

impl<T: Entity> PagedCollection<T> {
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            result: PageResult::default(),
            generation: 0,
            in_flight: false,
            error: None,
            failed: None,
            mutation_error: None,
            revision: 0,
        }
    }

    // ========================
    // Observers
    // ========================

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn result(&self) -> &PageResult<T> {
        &self.result
    }

    pub fn items(&self) -> &[T] {
        &self.result.items
    }

    pub fn total_count(&self) -> Option<u64> {
        self.result.total_count
    }

    /// True when the last page came back full and the loaded items belong
    /// to the current query
    pub fn has_more(&self) -> bool {
        self.result.has_more && self.is_synced()
    }

    /// Whether the loaded items were fetched for the current query. False
    /// while a new query is loading and after it failed.
    pub fn is_synced(&self) -> bool {
        self.result.loaded_query.as_ref() == Some(&self.query)
    }

    /// Page number of the loaded items, which lags `query().page` until the
    /// requested page arrives
    pub fn loaded_page(&self) -> u32 {
        self.result.loaded_query.as_ref().map_or(self.query.page, |q| q.page)
    }

    /// True while the latest issued fetch has not resolved
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Last fetch failure, cleared by the next applied fetch
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Last mutation failure, cleared by the next confirmed mutation
    pub fn mutation_error(&self) -> Option<&FetchError> {
        self.mutation_error.as_ref()
    }

    /// Bumped every time the loaded item list changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Merge `patch` into the query and issue a replace fetch.
    ///
    /// Always returns a ticket: every call is a fresh round trip, even when
    /// the query did not change.
    pub fn set_query(&mut self, patch: QueryPatch) -> FetchTicket {
        if self.query.apply(patch) {
            debug!("query changed: {:?}", self.query);
        }
        self.begin_fetch(FetchMode::Replace)
    }

    /// Issue an append fetch for the next page, or `None` when there is
    /// nothing more to load or a fetch is already in flight.
    ///
    /// Only a window that is still the current query can be continued: after
    /// a failed filter or sort change the old items are kept, but paging
    /// through them under the new query would mix two windows.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.in_flight || !self.has_more() {
            return None;
        }
        Some(self.begin_fetch(FetchMode::Append))
    }

    /// Re-issue the last failed fetch. A failed load-more asks for the same
    /// next page again; anything else refetches the current query.
    pub fn retry(&mut self) -> FetchTicket {
        match self.failed {
            Some(FetchMode::Append) if self.is_synced() => self.begin_fetch(FetchMode::Append),
            _ => self.begin_fetch(FetchMode::Replace),
        }
    }

    /// Issue a fetch for the current query.
    ///
    /// An append ticket requests the next page; the query's page number only
    /// advances once that page arrives, so a failed load-more can simply be
    /// retried.
    pub fn begin_fetch(&mut self, mode: FetchMode) -> FetchTicket {
        self.generation += 1;
        self.in_flight = true;
        let query = match mode {
            FetchMode::Replace => self.query.clone(),
            FetchMode::Append => self.append_base().next_page(),
        };
        debug!("fetch #{} {:?} page={}", self.generation, mode, query.page);
        FetchTicket {
            query,
            mode,
            generation: self.generation,
        }
    }

    /// Whether a ticket still matches the current query and is the latest
    /// one issued
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match ticket.mode {
            FetchMode::Replace => ticket.query == self.query,
            FetchMode::Append => ticket.query == self.append_base().next_page(),
        }
    }

    /// Window an append continues from
    fn append_base(&self) -> &QueryState {
        self.result.loaded_query.as_ref().unwrap_or(&self.query)
    }

    /// Apply the outcome of a ticket.
    ///
    /// The loaded items are replaced or extended only after a complete,
    /// parsed page arrives; a failure leaves them exactly as they were.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, outcome: FetchResult<Page<T>>) -> FetchStatus {
        if !self.is_current(&ticket) {
            debug!(
                "discarding stale response #{} (current #{})",
                ticket.generation, self.generation
            );
            return FetchStatus::Stale;
        }
        self.in_flight = false;

        match outcome {
            Ok(page) => {
                let page_len = page.items.len();
                self.result.has_more = page_len == ticket.query.limit as usize;
                self.result.total_count = page.total_count;
                match ticket.mode {
                    FetchMode::Replace => self.result.items = page.items,
                    FetchMode::Append => {
                        self.result.items.extend(page.items);
                        self.query = ticket.query.clone();
                    }
                }
                self.result.loaded_query = Some(ticket.query);
                self.error = None;
                self.failed = None;
                self.revision += 1;
                debug!(
                    "applied #{}: {} new, {} loaded, has_more={}",
                    ticket.generation,
                    page_len,
                    self.result.items.len(),
                    self.result.has_more
                );
                FetchStatus::Applied
            }
            Err(err) => {
                warn!("fetch #{} failed: {}", ticket.generation, err);
                self.error = Some(err.clone());
                self.failed = Some(ticket.mode);
                FetchStatus::Failed(err)
            }
        }
    }

    // ========================
    // Mutation reconciliation
    // ========================

    /// Apply a server-confirmed mutation to the loaded items without a
    /// refetch. A known total moves with creates and deletes.
    pub fn reconcile(&mut self, outcome: MutationOutcome<T>) {
        match outcome {
            MutationOutcome::Created(item) => {
                self.result.items.push(item);
                if let Some(total) = self.result.total_count.as_mut() {
                    *total += 1;
                }
            }
            MutationOutcome::Updated(item) => {
                let id = item.id();
                if let Some(slot) = self.result.items.iter_mut().find(|i| i.id() == id) {
                    *slot = item;
                }
            }
            MutationOutcome::Deleted(id) => {
                let before = self.result.items.len();
                self.result.items.retain(|i| i.id() != id);
                if self.result.items.len() < before {
                    if let Some(total) = self.result.total_count.as_mut() {
                        *total = total.saturating_sub(1);
                    }
                }
            }
        }
        self.mutation_error = None;
        self.revision += 1;
    }

    /// Record a failed mutation. The loaded items and the fetch error are
    /// not touched.
    pub fn record_mutation_error(&mut self, err: FetchError) {
        warn!("mutation failed: {}", err);
        self.mutation_error = Some(err);
    }

    // ========================
    // Derived views
    // ========================

    /// Aggregates over the loaded items only
    pub fn stats(&self, selectors: &Selectors<T>) -> DerivedStats {
        selectors.compute(&self.result.items)
    }

    /// Loaded items narrowed to what `actor` should see. Display only: the
    /// server is the authority on access.
    pub fn visible_to(&self, actor: &ActorContext) -> Vec<&T>
    where
        T: Visible,
    {
        visible_items(&self.result.items, actor)
    }

    /// Aggregates over the rows `actor` sees
    pub fn visible_stats(&self, actor: &ActorContext, selectors: &Selectors<T>) -> DerivedStats
    where
        T: Visible,
    {
        selectors.compute_refs(&self.visible_to(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Scalar;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        score: f64,
    }

    impl Entity for Row {
        type Id = u32;
        fn id(&self) -> u32 {
            self.id
        }
    }

    fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter().map(|&id| Row { id, score: id as f64 }).collect()
    }

    fn loaded(ids: &[u32], limit: u32) -> PagedCollection<Row> {
        let mut collection = PagedCollection::new(QueryState::new(limit));
        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Ok(Page::with_total(rows(ids), 10)));
        collection
    }

    #[test]
    fn test_replace_never_concatenates() {
        let mut collection = loaded(&[1, 2], 2);
        let ticket = collection.set_query(QueryPatch::new().sort("-score"));
        assert_eq!(collection.complete_fetch(ticket, Ok(Page::new(rows(&[9])))), FetchStatus::Applied);
        assert_eq!(collection.items(), rows(&[9]).as_slice());
        assert_eq!(collection.total_count(), None);
        assert!(!collection.has_more());
    }

    #[test]
    fn test_append_advances_page_on_success_only() {
        let mut collection = loaded(&[1, 2], 2);
        let ticket = collection.load_more().expect("has more");
        assert_eq!(ticket.query.page, 2);
        assert_eq!(collection.query().page, 1);

        let status = collection.complete_fetch(ticket, Err(FetchError::network("offline")));
        assert!(matches!(status, FetchStatus::Failed(_)));
        assert_eq!(collection.query().page, 1);
        assert_eq!(collection.items().len(), 2);

        let retry = collection.load_more().expect("retry allowed");
        assert_eq!(retry.query.page, 2);
        collection.complete_fetch(retry, Ok(Page::new(rows(&[3]))));
        assert_eq!(collection.query().page, 2);
        assert_eq!(collection.items().len(), 3);
        assert!(!collection.has_more());
    }

    #[test]
    fn test_load_more_guards() {
        let mut collection = loaded(&[1], 2);
        assert!(!collection.has_more());
        assert!(collection.load_more().is_none());

        let mut collection = loaded(&[1, 2], 2);
        let _pending = collection.begin_fetch(FetchMode::Replace);
        assert!(collection.is_loading());
        assert!(collection.load_more().is_none());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut collection = loaded(&[1, 2], 2);
        let first = collection.set_query(QueryPatch::new().filter("city", "Hanoi"));
        let second = collection.set_query(QueryPatch::new().filter("city", "Hue"));

        assert_eq!(collection.complete_fetch(second, Ok(Page::new(rows(&[5])))), FetchStatus::Applied);
        assert_eq!(collection.complete_fetch(first, Ok(Page::new(rows(&[4])))), FetchStatus::Stale);
        assert_eq!(collection.items(), rows(&[5]).as_slice());
    }

    #[test]
    fn test_stale_failure_does_not_record_error() {
        let mut collection = loaded(&[1, 2], 2);
        let first = collection.set_query(QueryPatch::new().sort("a"));
        let second = collection.set_query(QueryPatch::new().sort("b"));
        collection.complete_fetch(second, Ok(Page::new(rows(&[7]))));
        collection.complete_fetch(first, Err(FetchError::server("late 500")));
        assert!(collection.error().is_none());
        assert!(!collection.is_loading());
    }

    #[test]
    fn test_reconcile_create_update_delete() {
        let mut collection = loaded(&[1, 2], 2);
        let revision = collection.revision();

        collection.reconcile(MutationOutcome::Created(Row { id: 3, score: 30.0 }));
        assert_eq!(collection.items().len(), 3);
        assert_eq!(collection.total_count(), Some(11));

        collection.reconcile(MutationOutcome::Updated(Row { id: 1, score: 99.0 }));
        assert_eq!(collection.items()[0].score, 99.0);

        collection.reconcile(MutationOutcome::Deleted(2));
        assert_eq!(collection.items().iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(collection.total_count(), Some(10));
        assert_eq!(collection.revision(), revision + 3);
    }

    #[test]
    fn test_delete_of_unloaded_item_keeps_total() {
        let mut collection = loaded(&[1, 2], 2);
        collection.reconcile(MutationOutcome::Deleted(42));
        assert_eq!(collection.items().len(), 2);
        assert_eq!(collection.total_count(), Some(10));
    }

    #[test]
    fn test_success_clears_error() {
        let mut collection = loaded(&[1, 2], 2);
        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Err(FetchError::validation("bad sort")));
        assert!(collection.error().is_some());

        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Ok(Page::new(Vec::new())));
        assert!(collection.error().is_none());
        assert!(collection.items().is_empty());
        assert!(!collection.has_more());
    }
    #[test]
    fn test_failed_filter_change_does_not_continue_old_window() {
        let mut collection = PagedCollection::new(QueryState::new(2).with_filter("status", "pending"));
        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Ok(Page::new(rows(&[1, 2]))));
        assert!(collection.has_more());

        let ticket = collection.set_query(QueryPatch::new().filter("status", "approved"));
        collection.complete_fetch(ticket, Err(FetchError::network("offline")));
        assert_eq!(collection.items(), rows(&[1, 2]).as_slice());
        assert!(!collection.is_synced());
        assert!(!collection.has_more());
        assert!(collection.load_more().is_none());

        let retry = collection.retry();
        assert_eq!(retry.mode, FetchMode::Replace);
        assert_eq!(retry.query.page, 1);
        assert_eq!(retry.query.filters.get("status"), Some(&Scalar::from("approved")));
        collection.complete_fetch(retry, Ok(Page::new(rows(&[30, 40]))));
        assert_eq!(collection.items(), rows(&[30, 40]).as_slice());

        let next = collection.load_more().expect("approved window continues");
        assert_eq!(next.query.page, 2);
        assert_eq!(next.query.filters, collection.query().filters);
    }

    #[test]
    fn test_loaded_page_lags_until_requested_page_arrives() {
        let mut collection = loaded(&[1, 2], 2);
        let ticket = collection.set_query(QueryPatch::new().page(3));
        assert_eq!(collection.query().page, 3);
        assert_eq!(collection.loaded_page(), 1);

        collection.complete_fetch(ticket, Err(FetchError::server("boom")));
        assert_eq!(collection.loaded_page(), 1);
        assert!(!collection.has_more());

        let retry = collection.retry();
        collection.complete_fetch(retry, Ok(Page::new(rows(&[5, 6]))));
        assert_eq!(collection.loaded_page(), 3);
        assert!(collection.has_more());
    }

    #[test]
    fn test_retry_after_failed_load_more_appends() {
        let mut collection = loaded(&[1, 2], 2);
        let ticket = collection.load_more().expect("has more");
        collection.complete_fetch(ticket, Err(FetchError::network("offline")));

        let retry = collection.retry();
        assert_eq!(retry.mode, FetchMode::Append);
        assert_eq!(retry.query.page, 2);
        collection.complete_fetch(retry, Ok(Page::new(rows(&[3, 4]))));
        assert_eq!(collection.items().len(), 4);
        assert!(collection.error().is_none());
    }

    #[test]
    fn test_mutation_errors_stay_out_of_fetch_error() {
        let mut collection = loaded(&[1, 2], 2);
        collection.record_mutation_error(FetchError::validation("rating out of range"));
        assert!(collection.error().is_none());
        assert_eq!(collection.mutation_error().map(|e| e.kind), Some(crate::error::ErrorKind::Validation));

        let ticket = collection.begin_fetch(FetchMode::Replace);
        collection.complete_fetch(ticket, Err(FetchError::network("offline")));
        collection.reconcile(MutationOutcome::Deleted(1));
        assert!(collection.mutation_error().is_none());
        assert_eq!(collection.error().map(|e| e.kind), Some(crate::error::ErrorKind::Network));
    }
}

//! Reactive Paged Collections
//!
//! Leptos binding of the shared view model: the state lives in an
//! `RwSignal`, requests run on `spawn_local` through the same
//! `run_fetch`/`run_mutation` path the crate's scenario tests drive, and
//! every response goes back through the stale-response guard before it can
//! touch the signal.

use leptos::prelude::*;
use leptos::task::spawn_local;

use paged_collection::{
    run_fetch, run_mutation, ActorContext, CollectionSource, CollectionState, DerivedStats, Entity, FetchError,
    FetchMode, FetchResult, FetchTicket, MutationIntent, PagedCollection, QueryPatch, QueryState, Selectors,
    Visible,
};

/// One screen's paged collection. Copy, like the signals it wraps.
pub struct PagedSignal<T, S>
where
    T: Entity + Send + Sync,
    S: Send + Sync + 'static,
{
    state: RwSignal<PagedCollection<T>>,
    source: StoredValue<S>,
}

impl<T, S> Clone for PagedSignal<T, S>
where
    T: Entity + Send + Sync,
    S: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for PagedSignal<T, S>
where
    T: Entity + Send + Sync,
    S: Send + Sync + 'static,
{
}

impl<T, S> CollectionState<T> for PagedSignal<T, S>
where
    T: Entity + Send + Sync,
    S: Send + Sync + 'static,
{
    fn with_state<R>(&self, f: impl FnOnce(&mut PagedCollection<T>) -> R) -> Option<R> {
        self.state.try_update(f)
    }
}

impl<T, S> PagedSignal<T, S>
where
    T: Entity + Send + Sync,
    S: CollectionSource<T> + Clone + Send + Sync + 'static,
{
    pub fn new(source: S, query: QueryState) -> Self {
        Self {
            state: RwSignal::new(PagedCollection::new(query)),
            source: StoredValue::new(source),
        }
    }

    // ========================
    // Reactive reads
    // ========================

    pub fn items(&self) -> Vec<T> {
        self.state.with(|c| c.items().to_vec())
    }

    /// Loaded items narrowed for display to what `actor` should see
    pub fn visible_items(&self, actor: &ActorContext) -> Vec<T>
    where
        T: Visible,
    {
        self.state.with(|c| c.visible_to(actor).into_iter().cloned().collect())
    }

    /// Page number of the items on screen, not of a pending request
    pub fn page(&self) -> u32 {
        self.state.with(|c| c.loaded_page())
    }

    pub fn find(&self, id: &T::Id) -> Option<T> {
        self.state.with(|c| c.items().iter().find(|item| &item.id() == id).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|c| c.is_loading())
    }

    pub fn has_more(&self) -> bool {
        self.state.with(|c| c.has_more())
    }

    /// Last failed fetch; what the list's Retry repeats
    pub fn error(&self) -> Option<FetchError> {
        self.state.with(|c| c.error().cloned())
    }

    pub fn query(&self) -> QueryState {
        self.state.with(|c| c.query().clone())
    }

    pub fn total_count(&self) -> Option<u64> {
        self.state.with(|c| c.total_count())
    }

    pub fn stats(&self, selectors: &Selectors<T>) -> DerivedStats {
        self.state.with(|c| c.stats(selectors))
    }

    /// Aggregates over the rows `actor` sees
    pub fn visible_stats(&self, actor: &ActorContext, selectors: &Selectors<T>) -> DerivedStats
    where
        T: Visible,
    {
        self.state.with(|c| c.visible_stats(actor, selectors))
    }

    // ========================
    // Commands
    // ========================

    /// Refetch the current window, replacing the list
    pub fn refresh(&self) {
        self.dispatch(|c| Some(c.begin_fetch(FetchMode::Replace)));
    }

    pub fn set_query(&self, patch: QueryPatch) {
        self.dispatch(move |c| Some(c.set_query(patch)));
    }

    /// Append the next page; ignored while loading or when exhausted
    pub fn load_more(&self) {
        self.dispatch(|c| c.load_more());
    }

    /// Repeat the fetch that failed: the same appended page after a failed
    /// load-more, otherwise the first page of the current query
    pub fn retry(&self) {
        self.dispatch(|c| Some(c.retry()));
    }

    /// Send a mutation, reconcile on success, then report back to the caller
    pub fn mutate<F>(&self, intent: MutationIntent<T::Id, S::Draft>, on_done: F)
    where
        S::Draft: 'static,
        F: FnOnce(FetchResult<()>) + 'static,
    {
        let this = *self;
        let source = self.source.get_value();
        spawn_local(async move {
            on_done(run_mutation(&this, &source, intent).await);
        });
    }

    fn dispatch<F>(&self, issue: F)
    where
        F: FnOnce(&mut PagedCollection<T>) -> Option<FetchTicket>,
    {
        let Some(ticket) = self.state.try_update(issue).flatten() else {
            return;
        };
        let this = *self;
        let source = self.source.get_value();
        spawn_local(async move {
            run_fetch(&this, &source, ticket).await;
        });
    }
}

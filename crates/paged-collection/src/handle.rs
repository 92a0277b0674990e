//! Collection Handle
//!
//! Async driver pairing a [`PagedCollection`] with a [`CollectionSource`].
//! [`run_fetch`] and [`run_mutation`] are the one request path: anything that
//! owns a collection (this handle, a UI signal) implements
//! [`CollectionState`] and goes through them. The state is never borrowed
//! across an await, so overlapping calls interleave on a single-threaded
//! executor and the stale-response guard settles who wins.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::debug;

use crate::collection::{FetchMode, FetchStatus, FetchTicket, MutationIntent, PagedCollection};
use crate::entity::Entity;
use crate::error::FetchResult;
use crate::query::{QueryPatch, QueryState};
use crate::source::{send_mutation, CollectionSource};
use crate::stats::{DerivedStats, Selectors};

/// Somewhere a collection lives between requests.
///
/// `with_state` returns `None` once the owner is gone (a disposed signal);
/// responses arriving after that are dropped.
pub trait CollectionState<T: Entity> {
    fn with_state<R>(&self, f: impl FnOnce(&mut PagedCollection<T>) -> R) -> Option<R>;
}

impl<T: Entity> CollectionState<T> for Rc<RefCell<PagedCollection<T>>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut PagedCollection<T>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Send the request a ticket describes and hand the response to the guard
pub async fn run_fetch<T, S, C>(state: &C, source: &S, ticket: FetchTicket) -> Option<FetchStatus>
where
    T: Entity,
    S: CollectionSource<T>,
    C: CollectionState<T>,
{
    let generation = ticket.generation();
    debug!("[PAGING] #{} requesting {:?}", generation, ticket.query.to_params());
    let outcome = source.list(&ticket.query).await;
    let status = state.with_state(|c| c.complete_fetch(ticket, outcome));
    match &status {
        Some(FetchStatus::Stale) => debug!("[PAGING] response #{} superseded", generation),
        None => debug!("[PAGING] response #{} dropped, collection gone", generation),
        Some(_) => {}
    }
    status
}

/// Send a mutation. Confirmed results are folded into the items; a failure
/// lands in the mutation error and leaves the items alone.
pub async fn run_mutation<T, S, C>(state: &C, source: &S, intent: MutationIntent<T::Id, S::Draft>) -> FetchResult<()>
where
    T: Entity,
    S: CollectionSource<T>,
    C: CollectionState<T>,
{
    match send_mutation::<T, S>(source, intent).await {
        Ok(outcome) => {
            state.with_state(|c| c.reconcile(outcome));
            Ok(())
        }
        Err(err) => {
            state.with_state(|c| c.record_mutation_error(err.clone()));
            Err(err)
        }
    }
}

pub struct CollectionHandle<T: Entity, S> {
    state: Rc<RefCell<PagedCollection<T>>>,
    source: Rc<S>,
}

impl<T: Entity, S> Clone for CollectionHandle<T, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: Entity, S: CollectionSource<T>> CollectionHandle<T, S> {
    pub fn new(source: S, query: QueryState) -> Self {
        Self {
            state: Rc::new(RefCell::new(PagedCollection::new(query))),
            source: Rc::new(source),
        }
    }

    /// Read access to the current state
    pub fn state(&self) -> Ref<'_, PagedCollection<T>> {
        self.state.borrow()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Refetch the current window, replacing or appending
    pub async fn fetch(&self, mode: FetchMode) -> FetchStatus {
        let ticket = self.state.borrow_mut().begin_fetch(mode);
        self.run(ticket).await
    }

    /// Merge a query patch and refetch with replace semantics
    pub async fn set_query(&self, patch: QueryPatch) -> FetchStatus {
        let ticket = self.state.borrow_mut().set_query(patch);
        self.run(ticket).await
    }

    /// Fetch the next page, or `None` without any request when there is
    /// nothing to load or a fetch is in flight
    pub async fn load_more(&self) -> Option<FetchStatus> {
        let ticket = self.state.borrow_mut().load_more()?;
        Some(self.run(ticket).await)
    }

    /// Repeat whatever failed last
    pub async fn retry(&self) -> FetchStatus {
        let ticket = self.state.borrow_mut().retry();
        self.run(ticket).await
    }

    pub async fn mutate(&self, intent: MutationIntent<T::Id, S::Draft>) -> FetchResult<()> {
        run_mutation(&self.state, self.source.as_ref(), intent).await
    }

    pub fn stats(&self, selectors: &Selectors<T>) -> DerivedStats {
        self.state.borrow().stats(selectors)
    }

    async fn run(&self, ticket: FetchTicket) -> FetchStatus {
        // An Rc-owned state never disappears under the handle
        run_fetch(&self.state, self.source.as_ref(), ticket)
            .await
            .unwrap_or(FetchStatus::Stale)
    }
}

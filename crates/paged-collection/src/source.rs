//! Collection Source - Remote Seam
//!
//! Abstract interface to one remote collection endpoint and its single-item
//! mutation paths. Futures are not `Send`: everything runs on the browser's
//! single event loop.

use async_trait::async_trait;

use crate::collection::{MutationIntent, MutationOutcome};
use crate::entity::Entity;
use crate::error::{FetchError, FetchResult};
use crate::page::Page;
use crate::query::QueryState;

/// Paged read plus create/update/delete for one item type.
///
/// Mutation methods default to a validation error so read-only resources
/// only implement `list`.
#[async_trait(?Send)]
pub trait CollectionSource<T: Entity> {
    /// Payload sent on create and update
    type Draft;

    /// Fetch one window of the collection
    async fn list(&self, query: &QueryState) -> FetchResult<Page<T>>;

    /// Create an item, returning the server's copy
    async fn create(&self, _draft: &Self::Draft) -> FetchResult<T> {
        Err(FetchError::validation("create is not supported for this collection"))
    }

    /// Update an item, returning the server's copy
    async fn update(&self, _id: &T::Id, _draft: &Self::Draft) -> FetchResult<T> {
        Err(FetchError::validation("update is not supported for this collection"))
    }

    /// Delete an item
    async fn delete(&self, _id: &T::Id) -> FetchResult<()> {
        Err(FetchError::validation("delete is not supported for this collection"))
    }
}

/// Send one mutation and describe what the server confirmed
pub async fn send_mutation<T, S>(source: &S, intent: MutationIntent<T::Id, S::Draft>) -> FetchResult<MutationOutcome<T>>
where
    T: Entity,
    S: CollectionSource<T>,
{
    match intent {
        MutationIntent::Create { payload } => source.create(&payload).await.map(MutationOutcome::Created),
        MutationIntent::Update { id, payload } => source.update(&id, &payload).await.map(MutationOutcome::Updated),
        MutationIntent::Delete { id } => match source.delete(&id).await {
            Ok(()) => Ok(MutationOutcome::Deleted(id)),
            Err(err) => Err(err),
        },
    }
}

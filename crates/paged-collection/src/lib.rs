//! Paged Collection
//!
//! One view model for every "fetch a page, track loading, filter, aggregate"
//! screen. Layered the same way everywhere:
//! - entity: item identity contract
//! - query / page: request window and response shapes
//! - collection: sans-IO state machine (tickets, stale guard, reconciliation)
//! - source: async seam to the remote endpoint
//! - handle: the shared request path and an Rc-owned async driver
//! - stats / visibility: pure views over the loaded items

mod collection;
mod entity;
mod error;
mod handle;
mod page;
mod query;
mod source;
mod stats;
mod visibility;


pub use collection::{FetchMode, FetchStatus, FetchTicket, MutationIntent, MutationOutcome, PagedCollection};
pub use entity::Entity;
pub use error::{ErrorKind, FetchError, FetchResult};
pub use handle::{run_fetch, run_mutation, CollectionHandle, CollectionState};
pub use page::{Page, PageResult};
pub use query::{QueryPatch, QueryState, Scalar, DEFAULT_LIMIT};
pub use source::{send_mutation, CollectionSource};
pub use stats::{Aggregate, DerivedStats, Selectors};
pub use visibility::{dedup_by_id, visible_items, ActorContext, Role, Visible};

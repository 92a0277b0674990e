//! Item Identity Contract
//!
//! Every record a collection holds exposes a stable identifier.
//! The payload shape beyond that belongs to the remote API.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Core trait for all collection items
pub trait Entity: Clone + 'static {
    /// The type of the item's unique identifier
    type Id: Clone + Eq + Hash + Debug + Display + 'static;

    /// Returns the item's unique identifier
    fn id(&self) -> Self::Id;
}

//! REST API Wrappers
//!
//! Typed bindings to the marketplace backend, organized by resource. Each
//! resource implements `CollectionSource` so list screens can drive it
//! through the shared paged view model.

mod client;
mod experience;
mod review;
mod application;
mod withdrawal;

// Re-export all public items
pub use client::*;
pub use experience::*;
pub use review::*;
pub use application::*;
pub use withdrawal::*;

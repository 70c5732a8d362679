//! Observable, persisted stores for the basket and the favorite set.
//!
//! Each store is created once and shared by `Rc` with every view-model that
//! reads it. A mutation updates memory, rewrites the whole collection to the
//! key-value store, then broadcasts the new snapshot. Storage failures are
//! logged and otherwise ignored; memory stays authoritative for the session.

pub mod basket;
pub mod favorites;
pub mod relay;

pub use basket::BasketStore;
pub use favorites::FavoritesStore;
pub use relay::{Relay, Subscription};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A subscriber tried to mutate the store it is being notified by.
    #[error("Store mutated while broadcasting a change")]
    Reentrant,
}

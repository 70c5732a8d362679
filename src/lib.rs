//! Shopfront state layer
//!
//! Basket and favorites stores plus the view-models a shopping front end
//! reads from them.
//!
//! ## Features
//! - Basket store with per-product lines, persisted on every change
//! - Favorites store over product ids
//! - Observable stores with replay-last subscriptions
//! - Product list search, category filter and price sort
//! - Basket totals with discount breakdown
//! - Checkout form validation

pub mod catalog;
pub mod config;
pub mod domain;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod viewmodel;

pub use catalog::{CatalogError, ProductCatalogService};
pub use config::{AppConfig, ConfigError};
pub use domain::{BasketLine, BasketProductSnapshot, Money, Product};
pub use storage::{KeyValueStore, StorageError};
pub use store::{BasketStore, FavoritesStore, StoreError};
pub use viewmodel::ValidationError;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ShopError>;

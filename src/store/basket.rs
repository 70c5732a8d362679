//! Basket store

use std::rc::Rc;
use tracing::{debug, warn};
use crate::domain::{Basket, BasketLine, BasketProductSnapshot, Quantity};
use crate::storage::{self, KeyValueStore, BASKET_KEY};
use super::{Relay, StoreError, Subscription};

/// Owns the basket lines for the lifetime of the app.
pub struct BasketStore {
    storage: Rc<dyn KeyValueStore>,
    key: String,
    relay: Relay<Vec<BasketLine>>,
}

impl BasketStore {
    /// Load the basket saved under the default key.
    pub fn open(storage: Rc<dyn KeyValueStore>) -> Self { Self::with_key(storage, BASKET_KEY) }

    pub fn with_key(storage: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = match storage::load_json::<Vec<BasketLine>>(storage.as_ref(), &key) {
            Ok(Some(lines)) => Basket::from_lines(lines).into_lines(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable basket");
                Vec::new()
            }
        };
        debug!(key = %key, lines = lines.len(), "Basket loaded");
        Self { storage, key, relay: Relay::new(lines) }
    }

    pub fn current_basket(&self) -> Vec<BasketLine> { self.relay.value() }

    pub fn summary(&self) -> crate::domain::BasketSummary {
        self.relay.with(|lines| crate::domain::BasketSummary::of(lines))
    }

    /// Receive the current lines now and after every committed change.
    pub fn subscribe(&self, f: impl Fn(&[BasketLine]) + 'static) -> Subscription {
        self.relay.subscribe(move |lines: &Vec<BasketLine>| f(lines))
    }

    /// Add `qty` units (at least one), merging into an existing line.
    pub fn add(&self, product: BasketProductSnapshot, qty: i64) -> Result<Vec<BasketLine>, StoreError> {
        let id = product.id.clone();
        let qty = Quantity::at_least_one(qty);
        let lines = self.mutate(|basket| { basket.add(product, qty); true })?;
        debug!(product_id = %id, qty = qty.value(), "Added to basket");
        Ok(lines)
    }

    /// No-op if the product isn't in the basket.
    pub fn increase(&self, product_id: &str) -> Result<Vec<BasketLine>, StoreError> {
        self.mutate(|basket| basket.increase(product_id))
    }

    /// Removes the line once its quantity reaches zero. No-op if absent.
    pub fn decrease(&self, product_id: &str) -> Result<Vec<BasketLine>, StoreError> {
        self.mutate(|basket| basket.decrease(product_id))
    }

    pub fn remove(&self, product_id: &str) -> Result<Vec<BasketLine>, StoreError> {
        self.mutate(|basket| basket.remove(product_id))
    }

    pub fn clear(&self) -> Result<Vec<BasketLine>, StoreError> {
        self.mutate(|basket| { basket.clear(); true })
    }

    /// Apply `op`; when it reports a change, persist then broadcast.
    fn mutate(&self, op: impl FnOnce(&mut Basket) -> bool) -> Result<Vec<BasketLine>, StoreError> {
        self.relay.ensure_idle()?;
        let mut basket = Basket::from_lines(self.relay.value());
        if !op(&mut basket) {
            return Ok(basket.into_lines());
        }
        let lines = basket.into_lines();
        self.persist(&lines);
        self.relay.accept(lines.clone())?;
        Ok(lines)
    }

    fn persist(&self, lines: &[BasketLine]) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), &self.key, lines) {
            warn!(key = %self.key, error = %e, "Failed to persist basket; keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for BasketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasketStore").field("key", &self.key).field("lines", &self.relay.with(Vec::len)).finish()
    }
}

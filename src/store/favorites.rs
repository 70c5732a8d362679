//! Favorites store

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;
use tracing::{debug, warn};
use crate::storage::{self, KeyValueStore, FAVORITES_KEY};
use super::{Relay, StoreError, Subscription};

pub type FavoriteSet = HashSet<String>;

/// Owns the set of favorited product ids for the lifetime of the app.
pub struct FavoritesStore {
    storage: Rc<dyn KeyValueStore>,
    key: String,
    relay: Relay<FavoriteSet>,
}

impl FavoritesStore {
    pub fn open(storage: Rc<dyn KeyValueStore>) -> Self { Self::with_key(storage, FAVORITES_KEY) }

    pub fn with_key(storage: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match storage::load_json::<Vec<String>>(storage.as_ref(), &key) {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable favorites");
                FavoriteSet::new()
            }
        };
        Self { storage, key, relay: Relay::new(ids) }
    }

    pub fn current_favorites(&self) -> FavoriteSet { self.relay.value() }

    pub fn is_favorite(&self, product_id: &str) -> bool { self.relay.with(|set| set.contains(product_id)) }

    pub fn subscribe(&self, f: impl Fn(&FavoriteSet) + 'static) -> Subscription { self.relay.subscribe(f) }

    /// Flip membership and return the new state.
    pub fn toggle_favorite(&self, product_id: &str) -> Result<bool, StoreError> {
        let target = !self.is_favorite(product_id);
        self.set_favorite(target, product_id)
    }

    /// Set membership explicitly and return `is_favorite`.
    pub fn set_favorite(&self, is_favorite: bool, product_id: &str) -> Result<bool, StoreError> {
        self.relay.ensure_idle()?;
        let mut set = self.relay.value();
        if is_favorite { set.insert(product_id.to_string()); } else { set.remove(product_id); }
        self.persist(&set);
        self.relay.accept(set)?;
        debug!(product_id, is_favorite, "Favorite updated");
        Ok(is_favorite)
    }

    fn persist(&self, set: &FavoriteSet) {
        // Sorted so the stored payload is stable between writes.
        let ids: BTreeSet<&String> = set.iter().collect();
        if let Err(e) = storage::save_json(self.storage.as_ref(), &self.key, &ids) {
            warn!(key = %self.key, error = %e, "Failed to persist favorites; keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore").field("key", &self.key).field("count", &self.relay.with(HashSet::len)).finish()
    }
}

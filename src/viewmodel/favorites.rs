//! Favorites screen view-model.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::catalog::ProductCatalogService;
use crate::domain::Product;
use crate::store::favorites::FavoriteSet;
use crate::store::{BasketStore, FavoritesStore, Subscription};
use super::latest::LatestRequest;

pub const NO_FAVORITES_TEXT: &str = "You have no favorite products.";
pub const LOADING_FAVORITES_TEXT: &str = "Loading favorites...";

#[derive(Debug, Default)]
struct FavoritesState {
    favorite_ids: FavoriteSet,
    catalog_cache: Vec<Product>,
    items: Vec<Product>,
    empty_text: Option<String>,
}

impl FavoritesState {
    fn recompute(&mut self) {
        if self.catalog_cache.is_empty() {
            self.items.clear();
            let text = if self.favorite_ids.is_empty() { NO_FAVORITES_TEXT } else { LOADING_FAVORITES_TEXT };
            self.empty_text = Some(text.to_string());
            return;
        }
        self.items = self
            .catalog_cache
            .iter()
            .filter(|p| self.favorite_ids.contains(&p.key()))
            .cloned()
            .collect();
        self.empty_text = self.items.is_empty().then(|| NO_FAVORITES_TEXT.to_string());
    }
}

/// Joins the favorite ids with its own copy of the catalog.
pub struct FavoritesViewModel<S> {
    favorites: Rc<FavoritesStore>,
    basket: Rc<BasketStore>,
    service: Arc<S>,
    request: LatestRequest,
    state: Rc<RefCell<FavoritesState>>,
    _subscription: Subscription,
}

impl<S: ProductCatalogService> FavoritesViewModel<S> {
    pub fn new(favorites: Rc<FavoritesStore>, basket: Rc<BasketStore>, service: Arc<S>) -> Self {
        let state = Rc::new(RefCell::new(FavoritesState::default()));
        let weak = Rc::downgrade(&state);
        let subscription = favorites.subscribe(move |ids| {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                state.favorite_ids = ids.clone();
                state.recompute();
            }
        });
        Self { favorites, basket, service, request: LatestRequest::default(), state, _subscription: subscription }
    }

    pub fn items(&self) -> Vec<Product> { self.state.borrow().items.clone() }
    pub fn empty_text(&self) -> Option<String> { self.state.borrow().empty_text.clone() }
    pub fn catalog_len(&self) -> usize { self.state.borrow().catalog_cache.len() }

    /// Show what is known now and start fetching the catalog.
    pub fn load(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.favorite_ids = self.favorites.current_favorites();
            state.recompute();
        }
        let service = Arc::clone(&self.service);
        self.request.issue(async move { service.fetch_all().await });
    }

    /// Apply the pending catalog fetch. A failed fetch keeps the old cache.
    pub async fn settle(&mut self) -> bool {
        let Some((generation, result)) = self.request.settle().await else { return false };
        let mut state = self.state.borrow_mut();
        match result {
            Ok(products) => {
                debug!(generation, count = products.len(), "Favorites catalog loaded");
                state.catalog_cache = products;
            }
            Err(e) => warn!(generation, error = %e, "Favorites catalog fetch failed"),
        }
        state.favorite_ids = self.favorites.current_favorites();
        state.recompute();
        true
    }

    /// Replace the catalog cache directly, e.g. from another screen's fetch.
    pub fn set_catalog(&self, products: Vec<Product>) {
        let mut state = self.state.borrow_mut();
        state.catalog_cache = products;
        state.recompute();
    }

    pub fn remove_favorite(&self, product_id: &str) {
        if let Err(e) = self.favorites.set_favorite(false, product_id) {
            warn!(product_id, error = %e, "Remove favorite rejected");
        }
    }

    pub fn add_to_basket(&self, product: &Product) {
        if let Err(e) = self.basket.add(product.snapshot(), 1) {
            warn!(product_id = product.id, error = %e, "Add to basket rejected");
        }
    }
}

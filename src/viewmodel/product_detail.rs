//! Product detail view-model.

use std::cell::Cell;
use std::rc::Rc;
use tracing::warn;
use crate::domain::{BasketProductSnapshot, Product};
use crate::store::{BasketStore, FavoritesStore, Subscription};

pub struct ProductDetailViewModel {
    product: Product,
    favorites: Rc<FavoritesStore>,
    basket: Rc<BasketStore>,
    is_favorite: Rc<Cell<bool>>,
    selected_image_index: usize,
    _subscription: Subscription,
}

impl ProductDetailViewModel {
    pub fn new(product: Product, favorites: Rc<FavoritesStore>, basket: Rc<BasketStore>) -> Self {
        let is_favorite = Rc::new(Cell::new(false));
        let flag = Rc::downgrade(&is_favorite);
        let key = product.key();
        let subscription = favorites.subscribe(move |ids| {
            if let Some(flag) = flag.upgrade() { flag.set(ids.contains(&key)); }
        });
        Self { product, favorites, basket, is_favorite, selected_image_index: 0, _subscription: subscription }
    }

    pub fn product(&self) -> &Product { &self.product }
    pub fn title(&self) -> &str { &self.product.title }
    pub fn subtitle(&self) -> Option<&str> { self.product.description.as_deref() }
    pub fn price_text(&self) -> String { self.product.price_text() }
    /// Only set when a discount applies.
    pub fn old_price_text(&self) -> Option<String> { self.product.old_price_text() }
    pub fn image_urls(&self) -> &[String] { &self.product.images }
    pub fn selected_image_index(&self) -> usize { self.selected_image_index }
    pub fn is_favorite(&self) -> bool { self.is_favorite.get() }

    /// Returns the new favorite state; on a rejected toggle the old one.
    pub fn fav_tapped(&self) -> bool {
        match self.favorites.toggle_favorite(&self.product.key()) {
            Ok(state) => state,
            Err(e) => {
                warn!(product_id = self.product.id, error = %e, "Favorite toggle rejected");
                self.is_favorite.get()
            }
        }
    }

    pub fn did_change_image_index(&mut self, index: i64) {
        let last = self.product.images.len().saturating_sub(1);
        self.selected_image_index = (index.max(0) as usize).min(last);
    }

    pub fn basket_snapshot(&self) -> BasketProductSnapshot { self.product.snapshot() }

    pub fn add_to_basket(&self, qty: i64) {
        if let Err(e) = self.basket.add(self.basket_snapshot(), qty) {
            warn!(product_id = self.product.id, error = %e, "Add to basket rejected");
        }
    }
}

//! Basket screen view-model.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use crate::domain::{BasketLine, BasketSummary, Money};
use crate::store::{BasketStore, Subscription};

/// Derived display values for the basket screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasketView {
    pub lines: Vec<BasketLine>,
    pub summary: BasketSummary,
    pub price_text: String,
    pub discount_text: String,
    pub total_text: String,
}

impl BasketView {
    pub fn of(lines: &[BasketLine]) -> Self {
        let summary = BasketSummary::of(lines);
        Self {
            lines: lines.to_vec(),
            summary,
            price_text: summary.gross.to_string(),
            discount_text: summary.discount.to_string(),
            total_text: summary.total.to_string(),
        }
    }
}

impl Default for BasketView {
    fn default() -> Self { Self::of(&[]) }
}

/// Mirrors the basket store and recomputes totals on every broadcast.
///
/// Mutations are forwarded to the store; the view updates only when the
/// store reports the change back.
pub struct BasketViewModel {
    store: Rc<BasketStore>,
    view: Rc<RefCell<BasketView>>,
    _subscription: Subscription,
}

impl BasketViewModel {
    pub fn new(store: Rc<BasketStore>) -> Self {
        let view = Rc::new(RefCell::new(BasketView::default()));
        let weak = Rc::downgrade(&view);
        let subscription = store.subscribe(move |lines| {
            if let Some(view) = weak.upgrade() {
                *view.borrow_mut() = BasketView::of(lines);
            }
        });
        Self { store, view, _subscription: subscription }
    }

    /// Re-read the store directly.
    pub fn load(&self) {
        *self.view.borrow_mut() = BasketView::of(&self.store.current_basket());
    }

    pub fn view(&self) -> BasketView { self.view.borrow().clone() }
    pub fn lines(&self) -> Vec<BasketLine> { self.view.borrow().lines.clone() }
    pub fn price_text(&self) -> String { self.view.borrow().price_text.clone() }
    pub fn discount_text(&self) -> String { self.view.borrow().discount_text.clone() }
    pub fn total_text(&self) -> String { self.view.borrow().total_text.clone() }
    pub fn total(&self) -> Money { self.view.borrow().summary.total }
    pub fn is_empty(&self) -> bool { self.view.borrow().lines.is_empty() }

    pub fn increase(&self, product_id: &str) {
        if let Err(e) = self.store.increase(product_id) { warn!(product_id, error = %e, "Increase rejected"); }
    }

    pub fn decrease(&self, product_id: &str) {
        if let Err(e) = self.store.decrease(product_id) { warn!(product_id, error = %e, "Decrease rejected"); }
    }

    pub fn remove(&self, product_id: &str) {
        if let Err(e) = self.store.remove(product_id) { warn!(product_id, error = %e, "Remove rejected"); }
    }
}

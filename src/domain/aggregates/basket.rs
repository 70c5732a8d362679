//! Basket Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, Quantity};

/// Product data frozen at add-to-basket time.
///
/// `price` is the amount actually charged per unit; `old_price` is the
/// pre-discount reference price and is only present when a discount applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketProductSnapshot {
    pub id: String,
    pub title: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,
    #[serde(default, rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl BasketProductSnapshot {
    /// Unit price before any discount.
    pub fn reference_price(&self) -> Money { self.old_price.unwrap_or(self.price) }

    pub fn discount_per_item(&self) -> Money {
        self.old_price.map(|old| old - self.price).unwrap_or(Money::ZERO)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketLine {
    pub product: BasketProductSnapshot,
    pub quantity: Quantity,
}

impl BasketLine {
    pub fn new(product: BasketProductSnapshot, quantity: Quantity) -> Self { Self { product, quantity } }
    pub fn id(&self) -> &str { &self.product.id }
    pub fn gross_total(&self) -> Money { self.product.reference_price().multiply(self.quantity.value()) }
    pub fn discount_total(&self) -> Money { self.product.discount_per_item().multiply(self.quantity.value()) }
    pub fn charged_total(&self) -> Money { self.product.price.multiply(self.quantity.value()) }
}

/// Ordered basket contents with at most one line per product id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    pub fn new() -> Self { Self::default() }

    /// Rebuilds a basket from stored lines, merging any duplicate ids.
    pub fn from_lines(lines: Vec<BasketLine>) -> Self {
        let mut basket = Self::new();
        for line in lines { basket.add(line.product, line.quantity); }
        basket
    }

    pub fn lines(&self) -> &[BasketLine] { &self.lines }
    pub fn into_lines(self) -> Vec<BasketLine> { self.lines }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn line_count(&self) -> usize { self.lines.len() }
    pub fn item_count(&self) -> u64 { self.lines.iter().map(|l| u64::from(l.quantity.value())).sum() }
    pub fn get(&self, product_id: &str) -> Option<&BasketLine> { self.lines.iter().find(|l| l.id() == product_id) }

    fn position(&self, product_id: &str) -> Option<usize> { self.lines.iter().position(|l| l.id() == product_id) }

    pub fn add(&mut self, product: BasketProductSnapshot, qty: Quantity) {
        match self.position(&product.id) {
            Some(idx) => self.lines[idx].quantity = self.lines[idx].quantity.add(qty),
            None => self.lines.push(BasketLine::new(product, qty)),
        }
    }

    /// Returns `false` when no line matches.
    pub fn increase(&mut self, product_id: &str) -> bool {
        let Some(idx) = self.position(product_id) else { return false };
        self.lines[idx].quantity = self.lines[idx].quantity.increment();
        true
    }

    /// Drops the line once its quantity would reach zero. Returns `false` when no line matches.
    pub fn decrease(&mut self, product_id: &str) -> bool {
        let Some(idx) = self.position(product_id) else { return false };
        match self.lines[idx].quantity.decrement() {
            Some(q) => self.lines[idx].quantity = q,
            None => { self.lines.remove(idx); }
        }
        true
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id() != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) { self.lines.clear(); }

    pub fn summary(&self) -> BasketSummary { BasketSummary::of(&self.lines) }
}

/// Price breakdown of a set of basket lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasketSummary {
    pub gross: Money,
    pub discount: Money,
    pub total: Money,
}

impl BasketSummary {
    pub fn of(lines: &[BasketLine]) -> Self {
        let gross: Money = lines.iter().map(BasketLine::gross_total).sum();
        let discount: Money = lines.iter().map(BasketLine::discount_total).sum();
        Self { gross, discount, total: gross.saturating_sub(discount) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn snap(id: &str, price: i64, old: Option<i64>) -> BasketProductSnapshot {
        BasketProductSnapshot {
            id: id.into(), title: format!("Item {id}"),
            price: Money::new(Decimal::new(price, 0)),
            old_price: old.map(|o| Money::new(Decimal::new(o, 0))),
            image_url: None,
        }
    }

    #[test]
    fn test_basket_operations() {
        let mut basket = Basket::new();
        basket.add(snap("P1", 10, None), Quantity::at_least_one(2));
        basket.add(snap("P1", 10, None), Quantity::at_least_one(3));
        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.lines()[0].quantity.value(), 5); // Merged

        assert!(basket.increase("P1"));
        assert!(!basket.increase("missing"));
        assert_eq!(basket.item_count(), 6);
    }

    #[test]
    fn test_decrease_removes_line_at_zero() {
        let mut basket = Basket::new();
        basket.add(snap("P1", 10, None), Quantity::at_least_one(2));
        assert!(basket.decrease("P1"));
        assert!(basket.decrease("P1"));
        assert!(basket.is_empty());
        assert!(!basket.decrease("P1"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut basket = Basket::new();
        basket.add(snap("A", 1, None), Quantity::ONE);
        basket.add(snap("B", 1, None), Quantity::ONE);
        assert!(basket.remove("A"));
        let once = basket.clone();
        assert!(!basket.remove("A"));
        assert_eq!(basket, once);
    }

    #[test]
    fn test_summary_discount_arithmetic() {
        let mut basket = Basket::new();
        basket.add(snap("P", 80, Some(100)), Quantity::at_least_one(2));
        basket.add(snap("Q", 15, None), Quantity::ONE);
        let s = basket.summary();
        assert_eq!(s.gross.amount(), Decimal::new(215, 0));
        assert_eq!(s.discount.amount(), Decimal::new(40, 0));
        assert_eq!(s.total.amount(), Decimal::new(175, 0));
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let lines = vec![
            BasketLine::new(snap("A", 1, None), Quantity::ONE),
            BasketLine::new(snap("A", 1, None), Quantity::at_least_one(2)),
        ];
        let basket = Basket::from_lines(lines);
        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.get("A").unwrap().quantity.value(), 3);
    }

    #[test]
    fn test_line_wire_shape() {
        let line = BasketLine::new(snap("9", 5, Some(6)), Quantity::ONE);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["product"]["id"], "9");
        assert_eq!(json["quantity"], 1);
        assert!(json["product"].get("imageURL").is_none());
        assert!(json["product"].get("oldPrice").is_some());
    }
}

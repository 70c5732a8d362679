//! Domain records and value objects
pub mod aggregates;
pub mod value_objects;

pub use aggregates::{Basket, BasketLine, BasketProductSnapshot, BasketSummary, Product, Receipt};
pub use value_objects::{DiscountRate, Money, Quantity};

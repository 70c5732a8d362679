//! Aggregates module
pub mod product;
pub mod basket;
pub mod receipt;

pub use product::Product;
pub use basket::{Basket, BasketLine, BasketProductSnapshot, BasketSummary};
pub use receipt::Receipt;

//! Product Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{DiscountRate, Money};
use super::basket::BasketProductSnapshot;

/// A catalog record as the product-listing API returns it.
///
/// When a discount is present, `price` is the discounted price; the original
/// price is always derived through [`Product::old_price`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "images_or_empty")]
    pub images: Vec<String>,
}

fn images_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id, title: title.into(), price, description: None, discount_percentage: None,
            category: None, thumbnail: None, images: vec![],
        }
    }

    pub fn with_discount(mut self, percent: Decimal) -> Self { self.discount_percentage = Some(percent); self }
    pub fn with_category(mut self, category: impl Into<String>) -> Self { self.category = Some(category.into()); self }
    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.description = Some(description.into()); self }
    pub fn with_images(mut self, images: Vec<String>) -> Self { self.images = images; self }

    /// String form of the id, as used by the basket and favorites stores.
    pub fn key(&self) -> String { self.id.to_string() }

    pub fn price(&self) -> Money { Money::new(self.price) }

    pub fn discount(&self) -> DiscountRate { DiscountRate::new(self.discount_percentage.unwrap_or_default()) }

    /// Pre-discount price, recomputed from `price` on every call.
    pub fn old_price(&self) -> Option<Money> { self.discount().original_price(self.price()) }

    pub fn price_text(&self) -> String { self.price().to_string() }

    pub fn old_price_text(&self) -> Option<String> { self.old_price().map(|m| m.to_string()) }

    /// Category with blank values treated as missing.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Copies the fields the basket needs, charging the discounted price.
    pub fn snapshot(&self) -> BasketProductSnapshot {
        BasketProductSnapshot {
            id: self.key(),
            title: self.title.clone(),
            price: self.price(),
            old_price: self.old_price(),
            image_url: self.images.first().cloned().or_else(|| self.thumbnail.clone()),
        }
    }
}

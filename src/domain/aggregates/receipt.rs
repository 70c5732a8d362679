//! Receipt Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::value_objects::Money;
use super::basket::{BasketLine, BasketSummary};

/// Record of a simulated payment, taken from the basket just before it is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    id: Uuid,
    customer_name: String,
    email: String,
    item_count: u64,
    total: Money,
    placed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn issue(customer_name: impl Into<String>, email: impl Into<String>, lines: &[BasketLine]) -> Self {
        Self {
            id: Uuid::now_v7(),
            customer_name: customer_name.into(),
            email: email.into(),
            item_count: lines.iter().map(|l| u64::from(l.quantity.value())).sum(),
            total: BasketSummary::of(lines).total,
            placed_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn customer_name(&self) -> &str { &self.customer_name }
    pub fn email(&self) -> &str { &self.email }
    pub fn item_count(&self) -> u64 { self.item_count }
    pub fn total(&self) -> Money { self.total }
    pub fn placed_at(&self) -> DateTime<Utc> { self.placed_at }
}

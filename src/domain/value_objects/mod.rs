//! Value Objects for the shop front

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object.
///
/// Wraps a decimal amount in the app's single currency. Formatting is a pure
/// function of the amount: two fraction digits, `.` as the thousands
/// separator, `,` as the decimal mark and a trailing ` TL`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CURRENCY_SUFFIX: &'static str = "TL";

    pub fn new(amount: Decimal) -> Self { Self(amount) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }
    /// Saturates at the `Decimal` range.
    pub fn multiply(&self, qty: u32) -> Money { Money(self.0.saturating_mul(Decimal::from(qty))) }
    /// Floors at zero.
    pub fn saturating_sub(&self, other: Money) -> Money { Money(self.0.saturating_sub(other.0).max(Decimal::ZERO)) }

    /// Formats an amount with the app-wide currency policy.
    pub fn format(amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!("{sign}{grouped},{frac_part} {}", Self::CURRENCY_SUFFIX)
    }
}

impl std::ops::Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money { Money(self.0.saturating_add(rhs.0)) }
}

impl std::ops::Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money { Money(self.0.saturating_sub(rhs.0)) }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money { iter.fold(Money::ZERO, |acc, m| acc + m) }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self { Self(amount) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&Money::format(self.0)) }
}

/// Discount percentage in the open range the catalog reports (0–100).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    pub fn new(percent: Decimal) -> Self { Self(percent) }
    pub fn percent(&self) -> Decimal { self.0 }
    pub fn is_active(&self) -> bool { self.0 > Decimal::ZERO }

    /// Recovers the pre-discount price from a price that already has this
    /// discount applied: `price / (1 - percent / 100)`.
    ///
    /// Returns `None` when no discount applies or when the rate leaves no
    /// finite original price (100% and above).
    pub fn original_price(&self, discounted: Money) -> Option<Money> {
        if !self.is_active() { return None; }
        let factor = Decimal::ONE - self.0 / Decimal::ONE_HUNDRED;
        if factor <= Decimal::ZERO { return None; }
        discounted.amount().checked_div(factor).map(Money::new)
    }
}

/// Quantity value object. A basket line always holds at least one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Requested quantities below one are raised to one.
    pub fn at_least_one(value: i64) -> Self { Self(value.clamp(1, u32::MAX as i64) as u32) }
    pub fn value(&self) -> u32 { self.0 }
    pub fn add(&self, other: Quantity) -> Self { Self(self.0.saturating_add(other.0)) }
    pub fn increment(&self) -> Self { Self(self.0.saturating_add(1)) }
    /// `None` once the quantity would drop to zero.
    pub fn decrement(&self) -> Option<Self> {
        if self.0 <= 1 { None } else { Some(Self(self.0 - 1)) }
    }
}

impl Default for Quantity { fn default() -> Self { Self::ONE } }

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

//! Money type for representing monetary values.
//!
//! The storefront trades in whole rupees; the server sends prices as plain
//! integers, so amounts are stored as integer INR units rather than floats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A monetary value in whole rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Money = Money(0);

    /// Create a new Money value from whole rupees.
    pub fn new(rupees: i64) -> Self {
        Self(rupees)
    }

    /// Get the amount in whole rupees.
    pub fn rupees(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Saturating subtraction, clamped at zero.
    ///
    /// Used for savings calculations where a discounted price above the
    /// list price must not produce a negative saving.
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{20b9}{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000);
        let b = Money::new(500);
        assert_eq!((a + b).rupees(), 1500);
    }

    #[test]
    fn test_money_sum() {
        let prices = [Money::new(1000), Money::new(500), Money::new(250)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.rupees(), 1750);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1400).to_string(), "\u{20b9}1400");
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let list = Money::new(500);
        let discounted = Money::new(800);
        assert_eq!(list.saturating_sub(discounted), Money::ZERO);
    }

    #[test]
    fn test_money_roundtrips_as_plain_integer() {
        // The wire format carries prices as bare integers.
        let m = Money::new(4999);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "4999");
    }
}

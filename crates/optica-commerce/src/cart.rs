//! Cart pricing calculations.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Aggregate pricing for a list of saved products.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of list prices.
    pub mrp_total: Money,
    /// Sum of discounted prices.
    pub discounted_total: Money,
    /// Overall discount as a whole percentage, rounded down.
    pub discount_percentage: i64,
}

impl CartPricing {
    /// Compute the aggregate over a set of products.
    ///
    /// A zero MRP total yields a zero percentage rather than dividing
    /// by zero.
    pub fn from_products(products: &[Product]) -> Self {
        let mrp_total: Money = products.iter().map(|p| p.price).sum();
        let discounted_total: Money = products.iter().map(|p| p.discount_price).sum();

        let discount_percentage = if mrp_total.is_positive() {
            let savings = mrp_total.saturating_sub(discounted_total);
            100 * savings.rupees() / mrp_total.rupees()
        } else {
            0
        };

        Self {
            mrp_total,
            discounted_total,
            discount_percentage,
        }
    }

    /// Amount saved across the whole cart.
    pub fn savings(&self) -> Money {
        self.mrp_total.saturating_sub(self.discounted_total)
    }

    /// Check if any discount applies.
    pub fn has_discount(&self) -> bool {
        self.savings().is_positive()
    }
}

impl Default for CartPricing {
    fn default() -> Self {
        Self::from_products(&[])
    }
}

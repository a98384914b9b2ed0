//! # Quote Calculator
//!
//! Turns an item count and a [`PricingTier`] into subtotal, tax and total.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = items × unit_rate × (surcharge if tier ≠ Normal else 1)    │
//! │  tax      = subtotal × tax_rate                                        │
//! │  total    = subtotal + tax                                             │
//! │                                                                         │
//! │  Defaults: unit_rate $1,500.00 · surcharge ×1.25 · tax 8%              │
//! │                                                                         │
//! │  3 items, Normal    →  $4,500.00 + $360.00 = $4,860.00                 │
//! │  2 items, Overtime  →  $3,750.00 + $300.00 = $4,050.00                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PricingTier, TaxRate};

/// Amounts computed for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub tier: PricingTier,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Rates applied by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Price of one equipment item at the Normal tier.
    pub unit_rate: Money,
    /// Multiplier for Overtime and Holiday, in basis points (12500 = ×1.25).
    pub surcharge_bps: u32,
    /// IVA rate.
    pub tax_rate: TaxRate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            unit_rate: Money::from_major_minor(1500, 0),
            surcharge_bps: 12_500,
            tax_rate: TaxRate::from_bps(800),
        }
    }
}

impl PricingPolicy {
    /// Computes the breakdown for `items` pieces of equipment.
    ///
    /// ## Errors
    /// [`CoreError::EmptySelection`] when `items` is zero.
    pub fn price(&self, items: usize, tier: PricingTier) -> CoreResult<PriceBreakdown> {
        if items == 0 {
            return Err(CoreError::EmptySelection);
        }

        let base = self.unit_rate.multiply_quantity(items as i64);
        let subtotal = if tier.is_premium() {
            base.scale_bps(self.surcharge_bps)
        } else {
            base
        };
        let tax = subtotal.calculate_tax(self.tax_rate);

        Ok(PriceBreakdown {
            tier,
            subtotal,
            tax,
            total: subtotal + tax,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_items_normal() {
        let b = PricingPolicy::default().price(3, PricingTier::Normal).unwrap();
        assert_eq!(b.subtotal, Money::from_cents(450_000));
        assert_eq!(b.tax, Money::from_cents(36_000));
        assert_eq!(b.total, Money::from_cents(486_000));
        assert_eq!(b.total.to_string(), "$4,860.00");
    }

    #[test]
    fn test_two_items_overtime() {
        let b = PricingPolicy::default().price(2, PricingTier::Overtime).unwrap();
        assert_eq!(b.subtotal, Money::from_cents(375_000));
        assert_eq!(b.tax, Money::from_cents(30_000));
        assert_eq!(b.total, Money::from_cents(405_000));
    }

    #[test]
    fn test_holiday_uses_same_surcharge_as_overtime() {
        let policy = PricingPolicy::default();
        let holiday = policy.price(1, PricingTier::Holiday).unwrap();
        let overtime = policy.price(1, PricingTier::Overtime).unwrap();
        assert_eq!(holiday.total, overtime.total);
        assert_eq!(holiday.subtotal, Money::from_cents(187_500));
        assert_eq!(holiday.tier, PricingTier::Holiday);
    }

    #[test]
    fn test_full_catalog() {
        let b = PricingPolicy::default().price(6, PricingTier::Holiday).unwrap();
        // 6 × 1500 × 1.25 = 11250; × 1.08 = 12150
        assert_eq!(b.total.to_string(), "$12,150.00");
    }

    #[test]
    fn test_zero_items_rejected() {
        let err = PricingPolicy::default().price(0, PricingTier::Normal);
        assert_eq!(err, Err(CoreError::EmptySelection));
    }
}

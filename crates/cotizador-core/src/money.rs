//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    1500 × 1.25 × 0.08 in binary floating point is not exactly 150      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    150000 cents × 12500 bps / 10000 = 187500 cents                     │
//! │    187500 cents × 800 bps / 10000   =  15000 cents                     │
//! │    Every intermediate value is exact                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cotizador_core::money::Money;
//!
//! let rate = Money::from_major_minor(1500, 0); // $1,500.00
//! let subtotal = rate * 3;
//! assert_eq!(subtotal.to_string(), "$4,500.00");
//! assert_eq!(subtotal.to_decimal_string(), "4500.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// PricingPolicy.unit_rate ──► × items ──► × surcharge ──► subtotal
///                                                           │
///                                          subtotal × IVA ──┤
///                                                           ▼
///                                     total ──► PDF "$4,860.00"
///                                           └─► ledger "4860.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cotizador_core::money::Money;
    ///
    /// let price = Money::from_cents(150_000); // $1,500.00
    /// assert_eq!(price.cents(), 150_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Calculates tax, rounding half up at the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use cotizador_core::money::Money;
    /// use cotizador_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(450_000); // $4,500.00
    /// let iva = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(iva.cents(), 36_000); // $360.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.scale_bps(rate.bps())
    }

    /// Scales the amount by a factor expressed in basis points.
    ///
    /// `12500` multiplies by 1.25, `10000` leaves the amount unchanged.
    pub fn scale_bps(&self, bps: u32) -> Money {
        // i128 keeps large amounts from overflowing before the division
        let scaled = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(scaled as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Plain decimal form without currency symbol or grouping, e.g. `4860.00`.
    ///
    /// This is the form written to the ledger.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }

}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money the way the printed quote does: `$4,860.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.major().abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}.{:02}", sign, grouped, self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Multiplication by an item count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices, dues, credit limits, invoice totals are all i64 cents.      │
//! │    The dashboard converts to dollars for display only.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(2599); // $25.99
//!
//! // Arithmetic operations
//! let line_total = price.multiply_quantity(3); // $77.97
//! let with_fee = price + Money::from_cents(500); // $30.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for due adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support so stored JSON carries plain integers
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► InvoiceItem.price ──► invoice subtotal/tax/total    │
/// │                                                │                        │
/// │  Outlet.credit_limit ◄── credit check ◄────────┘                        │
/// │  Outlet.current_due  ◄── raised on Credit submission                    │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// let price = Money::from_cents(2599); // Represents $25.99
    /// assert_eq!(price.cents(), 2599);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half-up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5).
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    /// use depot_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(10_000); // $100.00
    /// let rate = TaxRate::from_bps(1000);       // 10%
    ///
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 1_000); // $10.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the value as a plain decimal string without a currency symbol.
    ///
    /// Used for CSV report cells, where `25.99` is expected rather than
    /// `$25.99`.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2599).to_decimal_string(), "25.99");
    /// assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    /// assert_eq!(Money::zero().to_decimal_string(), "0.00");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for error messages and debugging. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators, so aggregates read naturally:
/// `inventory.iter().map(|p| p.stock_value()).sum::<Money>()`
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(2599);
        assert_eq!(money.cents(), 2599);
        assert_eq!(money.dollars(), 25);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(25, 99);
        assert_eq!(money.cents(), 2599);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(2599)), "$25.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(2599).to_decimal_string(), "25.99");
        assert_eq!(Money::from_cents(500000).to_decimal_string(), "5000.00");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 49]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 399);
    }

    #[test]
    fn test_tax_ten_percent_exact() {
        // $100.00 at 10% = $10.00
        let amount = Money::from_cents(10_000);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.calculate_tax(rate).cents(), 1_000);
    }

    #[test]
    fn test_tax_ten_percent_rounding() {
        // $0.05 at 10% = $0.005 → rounds up to $0.01
        let amount = Money::from_cents(5);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.calculate_tax(rate).cents(), 1);

        // $0.04 at 10% = $0.004 → rounds down to $0.00
        let amount = Money::from_cents(4);
        assert_eq!(amount.calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}

//! # Classification Module
//!
//! Maps stock and credit ratios to discrete status labels.
//!
//! ## Threshold Bands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STOCK  (quantity / min_stock)        CREDIT  (due / credit_limit)      │
//! │                                                                         │
//! │    0% ────────────── Critical           0% ────────────── Good          │
//! │   50% ────────────── Low               30% ────────────── Moderate      │
//! │   80% ────────────── Normal            60% ────────────── High          │
//! │  120% ────────────── Good              80% ────────────── Critical      │
//! │                                       100% ────────────── Exceeded      │
//! │                                                                         │
//! │  Boundary convention: strict `<` ascending. A value exactly on a       │
//! │  breakpoint belongs to the band ABOVE it (50% is Low, not Critical;    │
//! │  100% is Exceeded).                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Floating Point
//! Ratios are compared by integer cross-multiplication
//! (`quantity * 100 < min_stock * threshold`), so breakpoints are exact.
//! A float rendition of 120% (1.2 * 100) lands at 119.999…, which would
//! misclassify the boundary.
//!
//! ## Zero Divisors
//! A zero `min_stock` or `credit_limit` cannot produce NaN/Infinity here;
//! the policy is explicit:
//! - `min_stock <= 0` → `Good` (no floor to fall below)
//! - `credit_limit <= 0` → `Exceeded` when anything is owed, else `Good`
//! - outlet status with `credit_limit <= 0` → `Blocked` when anything is
//!   owed, else `Active`

use crate::money::Money;
use crate::types::{CreditStanding, OutletStatus, StockLevel};

// =============================================================================
// Stock Classification
// =============================================================================

/// Classifies a stock level against its reorder floor.
///
/// ## Bands (percent of `min_stock`, strict `<` ascending)
/// - `< 50%`  → Critical
/// - `< 80%`  → Low
/// - `< 120%` → Normal
/// - else     → Good
///
/// ## Example
/// ```rust
/// use depot_core::classify::classify_stock;
/// use depot_core::StockLevel;
///
/// assert_eq!(classify_stock(49, 100), StockLevel::Critical);
/// assert_eq!(classify_stock(50, 100), StockLevel::Low);
/// assert_eq!(classify_stock(120, 100), StockLevel::Good);
/// ```
pub fn classify_stock(quantity: i64, min_stock: i64) -> StockLevel {
    if min_stock <= 0 {
        return StockLevel::Good;
    }

    // ratio < T%  ⟺  quantity * 100 < min_stock * T  (min_stock > 0)
    let scaled = quantity * 100;
    if scaled < min_stock * 50 {
        StockLevel::Critical
    } else if scaled < min_stock * 80 {
        StockLevel::Low
    } else if scaled < min_stock * 120 {
        StockLevel::Normal
    } else {
        StockLevel::Good
    }
}

// =============================================================================
// Credit Classification
// =============================================================================

/// Classifies an outlet's credit utilization into reporting bands.
///
/// ## Bands (percent of `credit_limit`, strict `<` ascending)
/// - `< 30%`  → Good
/// - `< 60%`  → Moderate
/// - `< 80%`  → High
/// - `< 100%` → Critical
/// - else     → Exceeded
pub fn classify_credit(current_due: Money, credit_limit: Money) -> CreditStanding {
    let due = current_due.cents();
    let limit = credit_limit.cents();

    if limit <= 0 {
        return if due > 0 {
            CreditStanding::Exceeded
        } else {
            CreditStanding::Good
        };
    }

    // i128 intermediates: limits are caller-provided and the product of two
    // i64 cent amounts can overflow.
    let scaled = due as i128 * 100;
    let limit = limit as i128;
    if scaled < limit * 30 {
        CreditStanding::Good
    } else if scaled < limit * 60 {
        CreditStanding::Moderate
    } else if scaled < limit * 80 {
        CreditStanding::High
    } else if scaled < limit * 100 {
        CreditStanding::Critical
    } else {
        CreditStanding::Exceeded
    }
}

// =============================================================================
// Outlet Status Derivation
// =============================================================================

/// Derives the operational outlet status from its due and limit.
///
/// This is the single source of truth for [`OutletStatus`]: the storage
/// layer recomputes it through this function on every due change.
///
/// ## Bands
/// - `>= 100%` → Blocked (no further invoices accepted)
/// - `>= 80%`  → Warning
/// - else      → Active
///
/// ## Example
/// ```rust
/// use depot_core::classify::outlet_status;
/// use depot_core::money::Money;
/// use depot_core::OutletStatus;
///
/// let limit = Money::from_cents(100_000);
/// assert_eq!(outlet_status(Money::from_cents(85_000), limit), OutletStatus::Warning);
/// assert_eq!(outlet_status(Money::from_cents(105_000), limit), OutletStatus::Blocked);
/// ```
pub fn outlet_status(current_due: Money, credit_limit: Money) -> OutletStatus {
    let due = current_due.cents();
    let limit = credit_limit.cents();

    if limit <= 0 {
        return if due > 0 {
            OutletStatus::Blocked
        } else {
            OutletStatus::Active
        };
    }

    if due >= limit {
        OutletStatus::Blocked
    } else if due as i128 * 100 >= limit as i128 * 80 {
        OutletStatus::Warning
    } else {
        OutletStatus::Active
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_boundaries() {
        // Exactly on a breakpoint belongs to the upper band
        assert_eq!(classify_stock(49, 100), StockLevel::Critical);
        assert_eq!(classify_stock(50, 100), StockLevel::Low);
        assert_eq!(classify_stock(79, 100), StockLevel::Low);
        assert_eq!(classify_stock(80, 100), StockLevel::Normal);
        assert_eq!(classify_stock(119, 100), StockLevel::Normal);
        assert_eq!(classify_stock(120, 100), StockLevel::Good);
    }

    #[test]
    fn test_stock_non_round_floor() {
        // 37/75 = 49.33% → Critical; 38/75 = 50.67% → Low
        assert_eq!(classify_stock(37, 75), StockLevel::Critical);
        assert_eq!(classify_stock(38, 75), StockLevel::Low);
        // 90/75 = 120% exactly → Good
        assert_eq!(classify_stock(90, 75), StockLevel::Good);
    }

    #[test]
    fn test_stock_zero_quantity_and_floor() {
        assert_eq!(classify_stock(0, 50), StockLevel::Critical);
        // No floor: nothing to fall below
        assert_eq!(classify_stock(0, 0), StockLevel::Good);
        assert_eq!(classify_stock(500, 0), StockLevel::Good);
    }

    #[test]
    fn test_credit_boundaries() {
        let limit = Money::from_cents(100_000);
        assert_eq!(classify_credit(Money::from_cents(29_999), limit), CreditStanding::Good);
        assert_eq!(classify_credit(Money::from_cents(30_000), limit), CreditStanding::Moderate);
        assert_eq!(classify_credit(Money::from_cents(59_999), limit), CreditStanding::Moderate);
        assert_eq!(classify_credit(Money::from_cents(60_000), limit), CreditStanding::High);
        assert_eq!(classify_credit(Money::from_cents(80_000), limit), CreditStanding::Critical);
        assert_eq!(classify_credit(Money::from_cents(99_999), limit), CreditStanding::Critical);
        assert_eq!(classify_credit(Money::from_cents(100_000), limit), CreditStanding::Exceeded);
        assert_eq!(classify_credit(Money::from_cents(250_000), limit), CreditStanding::Exceeded);
    }

    #[test]
    fn test_credit_zero_limit_policy() {
        let zero = Money::zero();
        assert_eq!(classify_credit(Money::zero(), zero), CreditStanding::Good);
        assert_eq!(classify_credit(Money::from_cents(1), zero), CreditStanding::Exceeded);
    }

    #[test]
    fn test_outlet_status_bands() {
        let limit = Money::from_cents(100_000);
        assert_eq!(outlet_status(Money::zero(), limit), OutletStatus::Active);
        assert_eq!(outlet_status(Money::from_cents(79_999), limit), OutletStatus::Active);
        assert_eq!(outlet_status(Money::from_cents(80_000), limit), OutletStatus::Warning);
        assert_eq!(outlet_status(Money::from_cents(85_000), limit), OutletStatus::Warning);
        assert_eq!(outlet_status(Money::from_cents(100_000), limit), OutletStatus::Blocked);
        assert_eq!(outlet_status(Money::from_cents(105_000), limit), OutletStatus::Blocked);
    }

    #[test]
    fn test_outlet_status_zero_limit_policy() {
        let zero = Money::zero();
        assert_eq!(outlet_status(Money::zero(), zero), OutletStatus::Active);
        assert_eq!(outlet_status(Money::from_cents(1), zero), OutletStatus::Blocked);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        // Near-max cent amounts must classify without panicking
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(classify_credit(huge, huge), CreditStanding::Exceeded);
        assert_eq!(outlet_status(huge, huge), OutletStatus::Blocked);
    }
}

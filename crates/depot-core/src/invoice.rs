//! # Invoice Drafting
//!
//! The pure half of invoice submission: line merging, stock validation with
//! price snapshotting, totals, and the credit-limit check. The storage layer
//! composes these inside a transaction; nothing here touches state.
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Submission Pipeline                          │
//! │                                                                         │
//! │  Draft lines [(product_id, qty), ...]                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_outlet()          outlet exists and is not Blocked              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_invoice_items()   merge duplicate lines, validate stock,        │
//! │       │                  freeze price/sku/name/available               │
//! │       ▼                                                                 │
//! │  invoice_totals()        subtotal = Σ price×qty, tax = 10%, total      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_credit()          Credit only: due + total <= limit             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  (storage layer persists invoice, raises due, decrements stock         │
//! │   in ONE transaction - see depot-store::workflow)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All checks run against the same inventory snapshot that prices the
//! lines, so a validated draft can never decrement stock below zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{InvoiceItem, Outlet, OutletStatus, PaymentMethod, Product};
use crate::{INVOICE_TAX_RATE, MAX_INVOICE_ITEMS};

// =============================================================================
// Draft Input
// =============================================================================

/// One requested line on a draft invoice: which product, how many.
///
/// Everything else (price, sku, name, availability) is frozen from the live
/// inventory at validation time, so a stale UI cannot invoice at an old
/// price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DraftItem {
    pub product_id: String,
    pub quantity: i64,
}

/// Computed money breakdown of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Validation Steps
// =============================================================================

/// Checks that an outlet can receive a new invoice.
///
/// A Blocked outlet (at or over its credit limit) is rejected regardless of
/// the payment method; the original credit must clear first.
pub fn check_outlet(outlet: &Outlet) -> CoreResult<()> {
    if outlet.status == OutletStatus::Blocked {
        return Err(CoreError::InvalidOutlet {
            id: outlet.id.clone(),
            reason: "outlet is blocked".to_string(),
        });
    }
    Ok(())
}

/// Merges duplicate product lines, summing quantities.
///
/// Preserves first-seen order so the stored invoice reads like the draft.
fn merge_draft_lines(items: &[DraftItem]) -> Vec<DraftItem> {
    let mut merged: Vec<DraftItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(item.clone()),
        }
    }
    merged
}

/// Validates draft lines against the live inventory and freezes line data.
///
/// ## Checks, in order
/// 1. At least one line ([`CoreError::EmptyInvoice`])
/// 2. At most [`MAX_INVOICE_ITEMS`] lines after merging
/// 3. Every quantity positive
/// 4. Every product id resolves ([`CoreError::ProductNotFound`])
/// 5. Every quantity within current stock ([`CoreError::InsufficientStock`])
///
/// ## Returns
/// Frozen [`InvoiceItem`]s carrying price, sku, name and the availability
/// observed at validation time.
pub fn build_invoice_items(
    draft: &[DraftItem],
    inventory: &[Product],
) -> CoreResult<Vec<InvoiceItem>> {
    if draft.is_empty() {
        return Err(CoreError::EmptyInvoice);
    }

    let merged = merge_draft_lines(draft);

    if merged.len() > MAX_INVOICE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_INVOICE_ITEMS as i64,
        }
        .into());
    }

    let mut items = Vec::with_capacity(merged.len());
    for line in &merged {
        if line.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        let product = inventory
            .iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

        if line.quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.quantity,
                requested: line.quantity,
            });
        }

        items.push(InvoiceItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: line.quantity,
            available: product.quantity,
        });
    }

    Ok(items)
}

/// Computes subtotal, tax and total for a set of frozen lines.
///
/// `tax` is the flat invoice rate ([`INVOICE_TAX_RATE`], 10%) on the
/// subtotal, rounded to the cent; `total = subtotal + tax` always holds
/// exactly.
pub fn invoice_totals(items: &[InvoiceItem]) -> InvoiceTotals {
    let subtotal: Money = items.iter().map(InvoiceItem::line_total).sum();
    let tax = subtotal.calculate_tax(INVOICE_TAX_RATE);
    InvoiceTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Rejects a Credit draft that would push the outlet past its limit.
///
/// `due + total <= limit` may land exactly on the limit; the invoice is
/// accepted and the outlet flips to Blocked when the due is raised.
/// Cash and Online drafts never touch the credit line.
pub fn check_credit(outlet: &Outlet, payment: PaymentMethod, total: Money) -> CoreResult<()> {
    if payment != PaymentMethod::Credit {
        return Ok(());
    }

    if outlet.current_due + total > outlet.credit_limit {
        return Err(CoreError::CreditLimitExceeded {
            credit_limit: outlet.credit_limit,
            current_due: outlet.current_due,
            invoice_total: total,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, sku: &str, price_cents: i64, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            sku: sku.to_string(),
            category: "Grains".to_string(),
            price: Money::from_cents(price_cents),
            quantity,
            unit: "bags".to_string(),
            min_stock: 10,
            room: None,
            rack: None,
            freezer: None,
        }
    }

    fn outlet(limit: i64, due: i64, status: OutletStatus) -> Outlet {
        Outlet {
            id: "OUT001".to_string(),
            name: "Harbor Street Supermarket".to_string(),
            outlet_type: "Official".to_string(),
            phone: "+1 234-567-8901".to_string(),
            credit_limit: Money::from_cents(limit),
            current_due: Money::from_cents(due),
            status,
        }
    }

    fn line(product_id: &str, quantity: i64) -> DraftItem {
        DraftItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_blocked_outlet_rejected() {
        let blocked = outlet(200_000, 210_000, OutletStatus::Blocked);
        assert!(matches!(
            check_outlet(&blocked),
            Err(CoreError::InvalidOutlet { .. })
        ));

        let warning = outlet(400_000, 380_000, OutletStatus::Warning);
        assert!(check_outlet(&warning).is_ok());
    }

    #[test]
    fn test_empty_draft_rejected() {
        assert!(matches!(
            build_invoice_items(&[], &[]),
            Err(CoreError::EmptyInvoice)
        ));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let inventory = [product("P001", "RIC001", 2599, 150)];
        let err = build_invoice_items(&[line("P999", 1)], &inventory).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "P999"));
    }

    #[test]
    fn test_insufficient_stock_rejected() {
        let inventory = [product("P001", "RIC001", 2599, 3)];
        let err = build_invoice_items(&[line("P001", 5)], &inventory).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_lines_merge_before_stock_check() {
        let inventory = [product("P001", "RIC001", 2599, 5)];
        // 3 + 3 = 6 > 5 available: must fail even though each line alone fits
        let err = build_invoice_items(&[line("P001", 3), line("P001", 3)], &inventory).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { requested: 6, .. }));

        // 2 + 3 = 5 fits exactly and collapses to one frozen line
        let items = build_invoice_items(&[line("P001", 2), line("P001", 3)], &inventory).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].available, 5);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let inventory = [product("P001", "RIC001", 2599, 150)];
        let err = build_invoice_items(&[line("P001", 0)], &inventory).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_items_freeze_product_data() {
        let inventory = [product("P001", "RIC001", 2599, 150)];
        let items = build_invoice_items(&[line("P001", 4)], &inventory).unwrap();
        assert_eq!(items[0].sku, "RIC001");
        assert_eq!(items[0].price.cents(), 2599);
        assert_eq!(items[0].available, 150);
    }

    #[test]
    fn test_totals_invariant() {
        let inventory = [
            product("P001", "RIC001", 2599, 150),
            product("P002", "OIL001", 1850, 85),
        ];
        let items =
            build_invoice_items(&[line("P001", 3), line("P002", 2)], &inventory).unwrap();
        let totals = invoice_totals(&items);

        // subtotal = Σ price × quantity
        assert_eq!(totals.subtotal.cents(), 2599 * 3 + 1850 * 2);
        // total = subtotal + tax, tax = rounded 10%
        assert_eq!(totals.total, totals.subtotal + totals.tax);
        let expected_tax = (totals.subtotal.cents() + 5) / 10;
        assert_eq!(totals.tax.cents(), expected_tax);
    }

    #[test]
    fn test_credit_check_boundaries() {
        let o = outlet(100_000, 90_000, OutletStatus::Warning);

        // 90_000 + 10_000 = limit exactly: accepted
        assert!(check_credit(&o, PaymentMethod::Credit, Money::from_cents(10_000)).is_ok());

        // One cent over: rejected
        let err = check_credit(&o, PaymentMethod::Credit, Money::from_cents(10_001)).unwrap_err();
        assert!(matches!(err, CoreError::CreditLimitExceeded { .. }));

        // Cash never touches the credit line
        assert!(check_credit(&o, PaymentMethod::Cash, Money::from_cents(999_999)).is_ok());
    }
}

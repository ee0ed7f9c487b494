//! # Invoice Submission Workflow
//!
//! Orchestrates create-invoice: validation, totals, persistence, the credit
//! due raise and the stock decrement - in one transaction.
//!
//! ## Submission Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 submit_invoice(outlet, items, payment)                  │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                      │
//! │    1. resolve outlet          ── unknown/Blocked → InvalidOutlet        │
//! │    2. validate items          ── merge lines, freeze prices,            │
//! │       against live stock        qty > stock → InsufficientStock         │
//! │    3. totals                  ── subtotal, 10% tax, total               │
//! │    4. credit check            ── Credit only:                           │
//! │                                  due + total > limit →                  │
//! │                                  CreditLimitExceeded                    │
//! │    ── no write has happened up to here ──                               │
//! │    5. insert invoice          ── id INV{n}, status Pending              │
//! │    6. raise outlet due        ── Credit only; may flip status           │
//! │    7. decrement stock         ── per frozen line                        │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure rolls the whole transaction back: the store never holds   │
//! │  an invoice without its stock decrement, or a raised due without its   │
//! │  invoice.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-4 read from the same transaction snapshot that steps 5-7 write,
//! so the stock validated is exactly the stock decremented and quantities
//! can never go negative.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::kv::{self, keys};
use crate::pool::Store;
use crate::repository::invoice::{InvoiceRepository, NewInvoice};
use crate::repository::inventory::InventoryRepository;
use crate::repository::outlet::OutletRepository;
use depot_core::invoice::{build_invoice_items, check_credit, check_outlet, invoice_totals, DraftItem};
use depot_core::{CoreError, Invoice, Outlet, PaymentMethod, Product};

// =============================================================================
// Input Shape
// =============================================================================

/// A submission request from the create-invoice screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInvoice {
    pub outlet_id: String,
    pub items: Vec<DraftItem>,
    pub payment: PaymentMethod,
    pub notes: Option<String>,
}

// =============================================================================
// Workflow
// =============================================================================

impl Store {
    /// Validates and persists a draft invoice.
    ///
    /// On success the invoice is stored with status Pending, the outlet's
    /// due is raised when the payment method is Credit (which may flip its
    /// status to Warning or Blocked), and every line's quantity is
    /// decremented from inventory.
    ///
    /// ## Errors
    /// All business failures surface as [`StoreError::Domain`] before any
    /// write: `InvalidOutlet`, `EmptyInvoice`, `ProductNotFound`,
    /// `InsufficientStock`, `CreditLimitExceeded`. Storage failures roll
    /// back every write of the submission.
    pub async fn submit_invoice(&self, submission: SubmitInvoice) -> StoreResult<Invoice> {
        debug!(
            outlet_id = %submission.outlet_id,
            lines = submission.items.len(),
            payment = %submission.payment,
            "submit_invoice"
        );

        let mut tx = self.pool().begin().await?;

        // Steps 1-4: pure validation against the transaction snapshot.
        let outlets: Vec<Outlet> = kv::read_json(&mut *tx, keys::OUTLETS)
            .await?
            .unwrap_or_default();
        let outlet = outlets
            .iter()
            .find(|o| o.id == submission.outlet_id)
            .ok_or_else(|| CoreError::InvalidOutlet {
                id: submission.outlet_id.clone(),
                reason: "unknown outlet".to_string(),
            })?;
        check_outlet(outlet)?;

        let inventory: Vec<Product> = kv::read_json(&mut *tx, keys::INVENTORY)
            .await?
            .unwrap_or_default();
        let items = build_invoice_items(&submission.items, &inventory)?;

        let totals = invoice_totals(&items);
        check_credit(outlet, submission.payment, totals.total)?;

        // Steps 5-7: the three writes, sharing the transaction.
        let now = Utc::now();
        let decrements: Vec<(String, i64)> = items
            .iter()
            .map(|item| (item.product_id.clone(), item.quantity))
            .collect();

        let invoice = InvoiceRepository::insert_in(
            &mut tx,
            NewInvoice {
                outlet_id: outlet.id.clone(),
                outlet_name: outlet.name.clone(),
                date: now.date_naive(),
                due_date: None,
                items,
                subtotal: totals.subtotal,
                tax: totals.tax,
                total: totals.total,
                payment: submission.payment,
                notes: submission.notes,
                created_at: now,
            },
        )
        .await?;

        if submission.payment == PaymentMethod::Credit {
            let outlet = OutletRepository::apply_due_in(&mut tx, &invoice.outlet_id, totals.total)
                .await?;
            debug!(
                outlet_id = %outlet.id,
                current_due = %outlet.current_due,
                status = %outlet.status,
                "Outlet due raised"
            );
        }

        InventoryRepository::decrement_in(&mut tx, &decrements).await?;

        tx.commit().await?;

        info!(
            id = %invoice.id,
            outlet_id = %invoice.outlet_id,
            total = %invoice.total,
            lines = invoice.items.len(),
            "Invoice submitted"
        );

        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::StoreConfig;
    use crate::repository::outlet::NewOutlet;
    use depot_core::{InvoiceStatus, Money, OutletStatus};

    async fn seeded_store() -> Store {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.seed().await.unwrap();
        store
    }

    fn line(product_id: &str, quantity: i64) -> DraftItem {
        DraftItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    fn submission(outlet_id: &str, items: Vec<DraftItem>, payment: PaymentMethod) -> SubmitInvoice {
        SubmitInvoice {
            outlet_id: outlet_id.to_string(),
            items,
            payment,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_submit_persists_pending_invoice_with_frozen_lines() {
        let store = seeded_store().await;

        let invoice = store
            .submit_invoice(submission(
                "OUT002",
                vec![line("P001", 3), line("P003", 2)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        assert_eq!(invoice.id, "INV006");
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].sku, "RIC001");
        assert_eq!(invoice.items[0].available, 150);

        // total == subtotal + 10% tax
        assert_eq!(invoice.subtotal.cents(), 2599 * 3 + 1850 * 2);
        assert_eq!(invoice.tax, invoice.subtotal.calculate_tax(depot_core::INVOICE_TAX_RATE));
        assert_eq!(invoice.total, invoice.subtotal + invoice.tax);

        // Persisted newest-first
        let stored = store.invoices().list().await.unwrap();
        assert_eq!(stored[0].id, "INV006");
    }

    #[tokio::test]
    async fn test_submit_decrements_stock_exactly() {
        let store = seeded_store().await;

        store
            .submit_invoice(submission(
                "OUT002",
                vec![line("P001", 30), line("P005", 60)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        let p1 = store.inventory().get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(p1.quantity, 150 - 30);
        let p5 = store.inventory().get_by_id("P005").await.unwrap().unwrap();
        assert_eq!(p5.quantity, 180 - 60);
    }

    #[tokio::test]
    async fn test_submit_whole_stock_reaches_zero_not_negative() {
        let store = seeded_store().await;

        store
            .submit_invoice(submission(
                "OUT002",
                vec![line("P003", 85)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        let p3 = store.inventory().get_by_id("P003").await.unwrap().unwrap();
        assert_eq!(p3.quantity, 0);

        // A second submission for the same product must now fail
        let err = store
            .submit_invoice(submission(
                "OUT002",
                vec![line("P003", 1)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_credit_submission_raises_due_and_flips_status() {
        let store = seeded_store().await;

        // Fresh outlet: limit 1000.00, due 0
        let outlet = store
            .outlets()
            .add(NewOutlet {
                name: "Corner Fresh Mart".to_string(),
                outlet_type: "Official".to_string(),
                phone: "+1 555-010-0000".to_string(),
                credit_limit: Money::from_cents(100_000),
                current_due: Money::zero(),
            })
            .await
            .unwrap();

        // 30 × 25.99 = 779.70, tax 77.97, total 857.67 → 85.8% → Warning
        let invoice = store
            .submit_invoice(submission(
                &outlet.id,
                vec![line("P001", 30)],
                PaymentMethod::Credit,
            ))
            .await
            .unwrap();
        assert_eq!(invoice.total.cents(), 85_767);

        let after = store.outlets().get_by_id(&outlet.id).await.unwrap().unwrap();
        assert_eq!(after.current_due, invoice.total);
        assert_eq!(after.status, OutletStatus::Warning);
    }

    #[tokio::test]
    async fn test_cash_submission_leaves_due_untouched() {
        let store = seeded_store().await;

        store
            .submit_invoice(submission(
                "OUT002",
                vec![line("P004", 10)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        let outlet = store.outlets().get_by_id("OUT002").await.unwrap().unwrap();
        assert_eq!(outlet.current_due, Money::zero());
        assert_eq!(outlet.status, OutletStatus::Active);
    }

    #[tokio::test]
    async fn test_blocked_outlet_rejected_before_any_write() {
        let store = seeded_store().await;

        // OUT003 is seeded Blocked
        let err = store
            .submit_invoice(submission(
                "OUT003",
                vec![line("P001", 1)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::InvalidOutlet { .. })
        ));

        assert_eq!(store.invoices().list().await.unwrap().len(), 5);
        let p1 = store.inventory().get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(p1.quantity, 150);
    }

    #[tokio::test]
    async fn test_unknown_outlet_rejected() {
        let store = seeded_store().await;
        let err = store
            .submit_invoice(submission(
                "OUT999",
                vec![line("P001", 1)],
                PaymentMethod::Cash,
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::InvalidOutlet { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_items_rejected() {
        let store = seeded_store().await;
        let err = store
            .submit_invoice(submission("OUT002", Vec::new(), PaymentMethod::Cash))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::EmptyInvoice)));
    }

    #[tokio::test]
    async fn test_credit_limit_rejection_leaves_store_unchanged() {
        let store = seeded_store().await;

        // Outlet with limit 1000.00 and due 900.00
        let outlet = store
            .outlets()
            .add(NewOutlet {
                name: "Corner Fresh Mart".to_string(),
                outlet_type: "Official".to_string(),
                phone: "+1 555-010-0000".to_string(),
                credit_limit: Money::from_cents(100_000),
                current_due: Money::from_cents(90_000),
            })
            .await
            .unwrap();
        assert_eq!(outlet.status, OutletStatus::Warning);

        // Draft with subtotal 100.00 → total 110.00; 900 + 110 > 1000
        let product = store
            .inventory()
            .add(crate::repository::inventory::NewProduct {
                name: "Crate of Spice Mix".to_string(),
                sku: "SPI001".to_string(),
                category: "Spices".to_string(),
                price: Money::from_cents(10_000),
                quantity: 50,
                unit: "crates".to_string(),
                min_stock: 5,
                room: Some("Room C".to_string()),
                rack: Some("R09".to_string()),
                freezer: None,
            })
            .await
            .unwrap();

        let err = store
            .submit_invoice(submission(
                &outlet.id,
                vec![line(&product.id, 1)],
                PaymentMethod::Credit,
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::CreditLimitExceeded { .. })
        ));

        // Nothing moved: no invoice, stock intact, due and status unchanged
        assert_eq!(store.invoices().list().await.unwrap().len(), 5);
        let unchanged = store
            .inventory()
            .get_by_id(&product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.quantity, 50);
        let outlet_after = store.outlets().get_by_id(&outlet.id).await.unwrap().unwrap();
        assert_eq!(outlet_after.current_due.cents(), 90_000);
        assert_eq!(outlet_after.status, OutletStatus::Warning);
    }

    #[tokio::test]
    async fn test_credit_submission_can_fill_limit_exactly_and_block() {
        let store = seeded_store().await;

        let outlet = store
            .outlets()
            .add(NewOutlet {
                name: "Corner Fresh Mart".to_string(),
                outlet_type: "Official".to_string(),
                phone: "+1 555-010-0000".to_string(),
                // Limit chosen to equal one crate's total exactly: 110.00
                credit_limit: Money::from_cents(11_000),
                current_due: Money::zero(),
            })
            .await
            .unwrap();

        let product = store
            .inventory()
            .add(crate::repository::inventory::NewProduct {
                name: "Crate of Spice Mix".to_string(),
                sku: "SPI001".to_string(),
                category: "Spices".to_string(),
                price: Money::from_cents(10_000),
                quantity: 50,
                unit: "crates".to_string(),
                min_stock: 5,
                room: None,
                rack: None,
                freezer: None,
            })
            .await
            .unwrap();

        // due + total == limit: accepted, and the raise flips the outlet
        store
            .submit_invoice(submission(
                &outlet.id,
                vec![line(&product.id, 1)],
                PaymentMethod::Credit,
            ))
            .await
            .unwrap();

        let after = store.outlets().get_by_id(&outlet.id).await.unwrap().unwrap();
        assert_eq!(after.current_due.cents(), 11_000);
        assert_eq!(after.status, OutletStatus::Blocked);
    }

    #[tokio::test]
    async fn test_submissions_issue_sequential_ids() {
        let store = seeded_store().await;

        for expected in ["INV006", "INV007", "INV008"] {
            let invoice = store
                .submit_invoice(submission(
                    "OUT002",
                    vec![line("P004", 5)],
                    PaymentMethod::Cash,
                ))
                .await
                .unwrap();
            assert_eq!(invoice.id, expected);
        }
    }
}

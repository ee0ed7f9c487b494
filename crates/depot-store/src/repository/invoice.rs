//! # Invoice Repository
//!
//! Storage operations for the invoice collection.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Invoice Lifecycle                                  │
//! │                                                                         │
//! │  1. SUBMIT (workflow module)                                           │
//! │     └── insert_in() → Invoice { id: "INV006", status: Pending }        │
//! │         (same transaction as the due raise and stock decrement)        │
//! │                                                                         │
//! │  2. REVIEW (admin side, external to this system)                       │
//! │     └── update_status(id, Approved, None)                              │
//! │     └── update_status(id, Rejected, Some("Credit limit exceeded"))     │
//! │                                                                         │
//! │  Invoices are never deleted in the normal flow; delete() exists for    │
//! │  administrative cleanup only.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collection is stored newest-first: inserts prepend, so the dashboard
//! list view needs no sort.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::{self, keys};
use depot_core::validation::validate_search_query;
use depot_core::{Invoice, InvoiceItem, InvoiceStatus, Money, PaymentMethod};

// =============================================================================
// Input Shape
// =============================================================================

/// A fully-computed invoice awaiting an id.
///
/// Built by the workflow after validation; the repository only issues the
/// id, stamps the status Pending and persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub outlet_id: String,
    pub outlet_name: String,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice storage operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists all invoices, newest first. Empty vec when unseeded.
    pub async fn list(&self) -> StoreResult<Vec<Invoice>> {
        Ok(kv::read_json(&self.pool, keys::INVOICES)
            .await?
            .unwrap_or_default())
    }

    /// Replaces the whole invoice collection.
    pub async fn set_all(&self, invoices: &[Invoice]) -> StoreResult<()> {
        kv::write_json(&self.pool, keys::INVOICES, invoices).await
    }

    /// Gets an invoice by its id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Invoice>> {
        Ok(self.list().await?.into_iter().find(|inv| inv.id == id))
    }

    /// Persists a new invoice in its own transaction.
    ///
    /// The invoice workflow does NOT use this; it calls [`Self::insert_in`]
    /// so the insert shares a transaction with the due raise and the stock
    /// decrement.
    pub async fn add(&self, new: NewInvoice) -> StoreResult<Invoice> {
        let mut tx = self.pool.begin().await?;
        let invoice = Self::insert_in(&mut tx, new).await?;
        tx.commit().await?;
        Ok(invoice)
    }

    /// Transitions an invoice's status, recording a reason on rejection.
    ///
    /// ## Errors
    /// - `StoreError::NotFound` on an unknown id
    pub async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        reason: Option<String>,
    ) -> StoreResult<Invoice> {
        debug!(id = %id, status = %status, "Updating invoice status");

        let mut tx = self.pool.begin().await?;

        let mut invoices: Vec<Invoice> = kv::read_json(&mut *tx, keys::INVOICES)
            .await?
            .unwrap_or_default();

        let invoice = invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| StoreError::not_found("Invoice", id))?;

        invoice.status = status;
        if reason.is_some() {
            invoice.reason = reason;
        }
        let updated = invoice.clone();

        kv::write_json(&mut *tx, keys::INVOICES, &invoices).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes an invoice (administrative cleanup only).
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting invoice");

        let mut tx = self.pool.begin().await?;

        let mut invoices: Vec<Invoice> = kv::read_json(&mut *tx, keys::INVOICES)
            .await?
            .unwrap_or_default();

        let before = invoices.len();
        invoices.retain(|inv| inv.id != id);
        if invoices.len() == before {
            return Err(StoreError::not_found("Invoice", id));
        }

        kv::write_json(&mut *tx, keys::INVOICES, &invoices).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Invoices in the given status.
    pub async fn by_status(&self, status: InvoiceStatus) -> StoreResult<Vec<Invoice>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|inv| inv.status == status)
            .collect())
    }

    /// Invoices raised against the given outlet.
    pub async fn by_outlet(&self, outlet_id: &str) -> StoreResult<Vec<Invoice>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|inv| inv.outlet_id == outlet_id)
            .collect())
    }

    /// Invoices dated within `[start, end]` inclusive.
    pub async fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<Invoice>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|inv| inv.date >= start && inv.date <= end)
            .collect())
    }

    /// Invoices settled with the given payment method.
    pub async fn by_payment(&self, payment: PaymentMethod) -> StoreResult<Vec<Invoice>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|inv| inv.payment == payment)
            .collect())
    }

    /// Case-insensitive substring search over id, outlet name/id and notes.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Invoice>> {
        let query = validate_search_query(query)?.to_lowercase();

        let invoices = self.list().await?;
        if query.is_empty() {
            return Ok(invoices);
        }

        Ok(invoices
            .into_iter()
            .filter(|inv| {
                inv.id.to_lowercase().contains(&query)
                    || inv.outlet_name.to_lowercase().contains(&query)
                    || inv.outlet_id.to_lowercase().contains(&query)
                    || inv
                        .notes
                        .as_ref()
                        .is_some_and(|n| n.to_lowercase().contains(&query))
            })
            .collect())
    }

    /// Issues the next `INV{n:03}` id and prepends the invoice, inside the
    /// caller's transaction.
    ///
    /// The counter is monotonic and shares the transaction, so concurrent
    /// submissions can never mint the same id and deletions never cause
    /// reuse.
    pub(crate) async fn insert_in(
        conn: &mut SqliteConnection,
        new: NewInvoice,
    ) -> StoreResult<Invoice> {
        let mut invoices: Vec<Invoice> = kv::read_json(&mut *conn, keys::INVOICES)
            .await?
            .unwrap_or_default();

        let seq = kv::next_sequence(&mut *conn, keys::INVOICE_SEQ).await?;
        let invoice = Invoice {
            id: format!("INV{seq:03}"),
            outlet_id: new.outlet_id,
            outlet_name: new.outlet_name,
            date: new.date,
            due_date: new.due_date,
            items: new.items,
            subtotal: new.subtotal,
            tax: new.tax,
            total: new.total,
            payment: new.payment,
            status: InvoiceStatus::Pending,
            reason: None,
            notes: new.notes,
            created_at: new.created_at,
        };

        invoices.insert(0, invoice.clone());
        kv::write_json(&mut *conn, keys::INVOICES, &invoices).await?;

        debug!(id = %invoice.id, total = %invoice.total, "Invoice persisted");
        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

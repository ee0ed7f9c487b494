//! # Seed Dataset
//!
//! The fixed initial dataset and the seed/reset lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Seed / Reset Lifecycle                             │
//! │                                                                         │
//! │  Store::seed()                                                         │
//! │    ├── manager_data key present? → no-op (idempotent)                  │
//! │    └── absent? → write all collections, counters, login=false          │
//! │                                                                         │
//! │  Store::reset()                                                        │
//! │    └── UNCONDITIONALLY overwrite all collections, reset the id         │
//! │        counters to the seeded high-water marks, clear the login flag   │
//! │                                                                         │
//! │  Both run in one transaction: a half-seeded store is unobservable.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! The dataset reads no clock and no RNG: every date and timestamp is a
//! fixed constant. Two resets therefore produce byte-identical collections,
//! which the dashboard relies on for its "restore demo data" action.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::info;

use crate::error::StoreResult;
use crate::kv::{self, keys};
use crate::pool::Store;
use depot_core::{
    Invoice, InvoiceStatus, Manager, Money, Outlet, OutletStatus, PaymentMethod, Product,
};

// =============================================================================
// Fixture Data
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Fixture dates are compile-time constants; a bad one is a programmer
    // error, not a runtime condition.
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 30, 0)
        .single()
        .expect("valid seed timestamp")
}

/// The seeded manager profile.
pub fn manager() -> Manager {
    Manager {
        id: "M001".to_string(),
        name: "Dana Whitfield".to_string(),
        email: "dana.whitfield@depot.example".to_string(),
        store_id: "ST001".to_string(),
        store_name: "Harborview Depot".to_string(),
        location: "128 Harbor Street".to_string(),
        phone: "+1 234-567-8900".to_string(),
        joined_date: date(2024, 1, 15),
    }
}

/// The seeded inventory: seven products across four categories, every one
/// at or above its reorder floor.
pub fn inventory() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        sku: &str,
        category: &str,
        price_cents: i64,
        quantity: i64,
        unit: &str,
        min_stock: i64,
        room: Option<&str>,
        rack: Option<&str>,
        freezer: Option<&str>,
    ) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            category: category.to_string(),
            price: Money::from_cents(price_cents),
            quantity,
            unit: unit.to_string(),
            min_stock,
            room: room.map(String::from),
            rack: rack.map(String::from),
            freezer: freezer.map(String::from),
        }
    }

    vec![
        product("P001", "Premium Rice 5kg", "RIC001", "Grains", 2599, 150, "bags", 50, Some("Room A"), Some("R01"), None),
        product("P002", "Organic Flour 2kg", "FLO001", "Grains", 899, 200, "bags", 80, Some("Room A"), Some("R02"), None),
        product("P003", "Virgin Olive Oil 1L", "OIL001", "Oils", 1850, 85, "bottles", 40, Some("Room B"), Some("R03"), None),
        product("P004", "Canned Tomatoes 400g", "CAN001", "Canned Goods", 299, 300, "cans", 100, Some("Room C"), Some("R04"), None),
        product("P005", "Pasta 500g", "PAS001", "Grains", 349, 180, "packs", 60, Some("Room A"), Some("R05"), None),
        product("P006", "Frozen Chicken 1kg", "CHK001", "Frozen", 1299, 75, "packs", 30, Some("Freezer Room"), None, Some("F01")),
        product("P007", "Ice Cream 1L", "ICE001", "Frozen", 699, 120, "tubs", 50, Some("Freezer Room"), None, Some("F02")),
    ]
}

/// The seeded outlets: one per status band, so every dashboard state is
/// visible out of the box.
pub fn outlets() -> Vec<Outlet> {
    fn outlet(
        id: &str,
        name: &str,
        outlet_type: &str,
        phone: &str,
        limit_cents: i64,
        due_cents: i64,
        status: OutletStatus,
    ) -> Outlet {
        Outlet {
            id: id.to_string(),
            name: name.to_string(),
            outlet_type: outlet_type.to_string(),
            phone: phone.to_string(),
            credit_limit: Money::from_cents(limit_cents),
            current_due: Money::from_cents(due_cents),
            status,
        }
    }

    vec![
        // 25% utilization
        outlet("OUT001", "Harbor Street Supermarket", "Official", "+1 234-567-8901", 500_000, 125_000, OutletStatus::Active),
        // 0% utilization
        outlet("OUT002", "Westgate Grocery", "Official", "+1 234-567-8902", 300_000, 0, OutletStatus::Active),
        // 105% utilization
        outlet("OUT003", "Quickstop Express", "Reseller", "+1 234-567-8903", 200_000, 210_000, OutletStatus::Blocked),
        // 95% utilization
        outlet("OUT004", "Nightowl Convenience", "Official", "+1 234-567-8904", 400_000, 380_000, OutletStatus::Warning),
    ]
}

/// The seeded invoices, newest first, spanning every status and payment
/// method. Totals satisfy `total = subtotal + round(10% tax)` exactly.
pub fn invoices() -> Vec<Invoice> {
    fn invoice(
        id: &str,
        outlet_id: &str,
        outlet_name: &str,
        d: NaiveDate,
        due: Option<NaiveDate>,
        subtotal_cents: i64,
        payment: PaymentMethod,
        status: InvoiceStatus,
        reason: Option<&str>,
    ) -> Invoice {
        let subtotal = Money::from_cents(subtotal_cents);
        let tax = subtotal.calculate_tax(depot_core::INVOICE_TAX_RATE);
        Invoice {
            id: id.to_string(),
            outlet_id: outlet_id.to_string(),
            outlet_name: outlet_name.to_string(),
            date: d,
            due_date: due,
            items: Vec::new(),
            subtotal,
            tax,
            total: subtotal + tax,
            payment,
            status,
            reason: reason.map(String::from),
            notes: None,
            created_at: timestamp(d.year(), d.month(), d.day()),
        }
    }

    vec![
        invoice("INV005", "OUT004", "Nightowl Convenience", date(2024, 3, 15), Some(date(2024, 4, 15)), 345_500, PaymentMethod::Credit, InvoiceStatus::Approved, None),
        invoice("INV004", "OUT001", "Harbor Street Supermarket", date(2024, 3, 14), None, 81_000, PaymentMethod::Online, InvoiceStatus::Pending, None),
        invoice("INV003", "OUT003", "Quickstop Express", date(2024, 3, 13), None, 191_000, PaymentMethod::Credit, InvoiceStatus::Rejected, Some("Credit limit exceeded")),
        invoice("INV002", "OUT001", "Harbor Street Supermarket", date(2024, 3, 12), None, 59_100, PaymentMethod::Cash, InvoiceStatus::Approved, None),
        invoice("INV001", "OUT002", "Westgate Grocery", date(2024, 3, 11), Some(date(2024, 3, 25)), 113_700, PaymentMethod::Credit, InvoiceStatus::Approved, None),
    ]
}

/// Sequence counters positioned after the highest seeded id, so the first
/// post-seed insert yields P008 / OUT005 / INV006.
const SEEDED_PRODUCT_SEQ: i64 = 7;
const SEEDED_OUTLET_SEQ: i64 = 4;
const SEEDED_INVOICE_SEQ: i64 = 5;

// =============================================================================
// Seed / Reset
// =============================================================================

impl Store {
    /// Writes the fixed initial dataset if no prior data exists.
    ///
    /// ## Returns
    /// * `Ok(true)` - store was empty and has been seeded
    /// * `Ok(false)` - data already present, nothing written (idempotent)
    pub async fn seed(&self) -> StoreResult<bool> {
        let mut tx = self.pool().begin().await?;

        if kv::exists(&mut *tx, keys::MANAGER).await? {
            info!("Store already initialized, skipping seed");
            return Ok(false);
        }

        write_fixture(&mut tx).await?;
        tx.commit().await?;

        info!("Seed dataset written");
        Ok(true)
    }

    /// Unconditionally overwrites all collections with the fixed initial
    /// dataset, resets the id counters and clears the login flag.
    ///
    /// Running reset twice yields byte-identical collections.
    pub async fn reset(&self) -> StoreResult<()> {
        let mut tx = self.pool().begin().await?;
        write_fixture(&mut tx).await?;
        tx.commit().await?;

        info!("Store reset to seed dataset");
        Ok(())
    }
}

async fn write_fixture(conn: &mut sqlx::SqliteConnection) -> StoreResult<()> {
    kv::write_json(&mut *conn, keys::MANAGER, &manager()).await?;
    kv::write_json(&mut *conn, keys::INVENTORY, &inventory()).await?;
    kv::write_json(&mut *conn, keys::OUTLETS, &outlets()).await?;
    kv::write_json(&mut *conn, keys::INVOICES, &invoices()).await?;
    kv::write_json(&mut *conn, keys::LOGIN_STATUS, &false).await?;
    kv::write_json(&mut *conn, keys::PRODUCT_SEQ, &SEEDED_PRODUCT_SEQ).await?;
    kv::write_json(&mut *conn, keys::OUTLET_SEQ, &SEEDED_OUTLET_SEQ).await?;
    kv::write_json(&mut *conn, keys::INVOICE_SEQ, &SEEDED_INVOICE_SEQ).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

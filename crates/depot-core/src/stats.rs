//! # Derived Statistics
//!
//! Pure aggregation functions behind the dashboard cards and the detail
//! panels for a single outlet or product.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard Aggregation Flow                          │
//! │                                                                         │
//! │  Storage layer                                                          │
//! │    inventory ──┐                                                        │
//! │    invoices  ──┼──► compute_dashboard_stats() ──► DashboardStats        │
//! │    outlets   ──┘            (THIS MODULE)              │                │
//! │                                                        ▼                │
//! │                                          Stat cards on the dashboard    │
//! │                                                                         │
//! │  Every reduction is a commutative sum or count, so results are          │
//! │  independent of collection order.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The clock is never read here; callers that want "today's sales" pass the
//! date in ([`today_sales`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Invoice, InvoiceStatus, Outlet, OutletStatus, Product};

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Aggregates shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    /// Σ price × quantity over the inventory.
    pub total_stock_value: Money,

    /// Products below their reorder floor (`quantity < min_stock`).
    pub low_stock_items: usize,

    pub pending_invoices: usize,
    pub approved_invoices: usize,
    pub rejected_invoices: usize,

    /// Outlets currently in Active standing.
    pub active_outlets: usize,

    /// Σ current due over all outlets (outstanding credit).
    pub total_credit: Money,

    /// Σ total over Approved invoices.
    pub total_sales: Money,
}

/// Computes the dashboard aggregates from the three business collections.
///
/// Pure and order-independent: all reductions are commutative sums/counts,
/// so reordering any input list yields the same result.
pub fn compute_dashboard_stats(
    inventory: &[Product],
    invoices: &[Invoice],
    outlets: &[Outlet],
) -> DashboardStats {
    DashboardStats {
        total_stock_value: inventory.iter().map(Product::stock_value).sum(),
        low_stock_items: inventory.iter().filter(|p| p.is_low_stock()).count(),
        pending_invoices: count_by_status(invoices, InvoiceStatus::Pending),
        approved_invoices: count_by_status(invoices, InvoiceStatus::Approved),
        rejected_invoices: count_by_status(invoices, InvoiceStatus::Rejected),
        active_outlets: outlets
            .iter()
            .filter(|o| o.status == OutletStatus::Active)
            .count(),
        total_credit: outlets.iter().map(|o| o.current_due).sum(),
        total_sales: approved_total(invoices),
    }
}

/// Σ total over Approved invoices dated `today`.
///
/// The date comes from the caller so this stays a pure function.
pub fn today_sales(invoices: &[Invoice], today: NaiveDate) -> Money {
    invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Approved && inv.date == today)
        .map(|inv| inv.total)
        .sum()
}

fn count_by_status(invoices: &[Invoice], status: InvoiceStatus) -> usize {
    invoices.iter().filter(|inv| inv.status == status).count()
}

fn approved_total(invoices: &[Invoice]) -> Money {
    invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Approved)
        .map(|inv| inv.total)
        .sum()
}

// =============================================================================
// Outlet Stats
// =============================================================================

/// Per-outlet figures shown on the outlet detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OutletStats {
    pub total_invoices: usize,
    pub approved_invoices: usize,
    pub pending_invoices: usize,

    /// Σ total over the outlet's Approved invoices.
    pub total_purchases: Money,

    pub current_due: Money,
    pub credit_limit: Money,

    /// Utilization as a percentage for display (0.0 when the limit is zero).
    pub credit_utilization: f64,
}

/// Computes activity and credit figures for a single outlet.
///
/// `invoices` is the full collection; filtering happens here so callers
/// don't have to pre-slice.
pub fn outlet_stats(outlet: &Outlet, invoices: &[Invoice]) -> OutletStats {
    let own: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.outlet_id == outlet.id)
        .collect();

    let approved = own
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Approved)
        .count();
    let pending = own
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Pending)
        .count();
    let purchases: Money = own
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Approved)
        .map(|inv| inv.total)
        .sum();

    let utilization = if outlet.credit_limit.is_positive() {
        outlet.current_due.cents() as f64 / outlet.credit_limit.cents() as f64 * 100.0
    } else {
        0.0
    };

    OutletStats {
        total_invoices: own.len(),
        approved_invoices: approved,
        pending_invoices: pending,
        total_purchases: purchases,
        current_due: outlet.current_due,
        credit_limit: outlet.credit_limit,
        credit_utilization: utilization,
    }
}

// =============================================================================
// Product Stats
// =============================================================================

/// Per-product sales figures shown on the product detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductStats {
    /// Units sold across Approved invoices.
    pub total_sold: i64,

    /// Revenue from those units (frozen line prices, not current price).
    pub total_revenue: Money,

    pub current_stock: i64,

    /// Value of the stock on hand at the current price.
    pub stock_value: Money,
}

/// Computes lifetime sales figures for a single product.
pub fn product_stats(product: &Product, invoices: &[Invoice]) -> ProductStats {
    let mut total_sold = 0;
    let mut total_revenue = Money::zero();

    for invoice in invoices {
        if invoice.status != InvoiceStatus::Approved {
            continue;
        }
        for item in &invoice.items {
            if item.product_id == product.id {
                total_sold += item.quantity;
                total_revenue += item.line_total();
            }
        }
    }

    ProductStats {
        total_sold,
        total_revenue,
        current_stock: product.quantity,
        stock_value: product.stock_value(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::{InvoiceItem, PaymentMethod};

    fn product(id: &str, price_cents: i64, quantity: i64, min_stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            sku: format!("SKU-{id}"),
            category: "Grains".to_string(),
            price: Money::from_cents(price_cents),
            quantity,
            unit: "bags".to_string(),
            min_stock,
            room: None,
            rack: None,
            freezer: None,
        }
    }

    fn outlet(id: &str, limit: i64, due: i64, status: OutletStatus) -> Outlet {
        Outlet {
            id: id.to_string(),
            name: format!("Outlet {id}"),
            outlet_type: "Official".to_string(),
            phone: "+1 555-0100".to_string(),
            credit_limit: Money::from_cents(limit),
            current_due: Money::from_cents(due),
            status,
        }
    }

    fn invoice(
        id: &str,
        outlet_id: &str,
        total_cents: i64,
        status: InvoiceStatus,
        date: NaiveDate,
    ) -> Invoice {
        Invoice {
            id: id.to_string(),
            outlet_id: outlet_id.to_string(),
            outlet_name: format!("Outlet {outlet_id}"),
            date,
            due_date: None,
            items: Vec::new(),
            subtotal: Money::from_cents(total_cents * 10 / 11),
            tax: Money::from_cents(total_cents - total_cents * 10 / 11),
            total: Money::from_cents(total_cents),
            payment: PaymentMethod::Credit,
            status,
            reason: None,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dashboard_stats() {
        let inventory = vec![
            product("P001", 1000, 10, 5),  // value 10_000, not low
            product("P002", 500, 2, 10),   // value 1_000, low
            product("P003", 200, 10, 10),  // value 2_000, at floor = not low
        ];
        let outlets = vec![
            outlet("OUT001", 100_000, 10_000, OutletStatus::Active),
            outlet("OUT002", 100_000, 85_000, OutletStatus::Warning),
        ];
        let d = day(2024, 3, 15);
        let invoices = vec![
            invoice("INV001", "OUT001", 11_000, InvoiceStatus::Approved, d),
            invoice("INV002", "OUT001", 5_500, InvoiceStatus::Pending, d),
            invoice("INV003", "OUT002", 2_200, InvoiceStatus::Rejected, d),
        ];

        let stats = compute_dashboard_stats(&inventory, &invoices, &outlets);

        assert_eq!(stats.total_stock_value.cents(), 13_000);
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.pending_invoices, 1);
        assert_eq!(stats.approved_invoices, 1);
        assert_eq!(stats.rejected_invoices, 1);
        assert_eq!(stats.active_outlets, 1);
        assert_eq!(stats.total_credit.cents(), 95_000);
        assert_eq!(stats.total_sales.cents(), 11_000);
    }

    #[test]
    fn test_dashboard_stats_order_independent() {
        let inventory = vec![product("P001", 1000, 10, 5), product("P002", 500, 2, 10)];
        let outlets = vec![
            outlet("OUT001", 100_000, 10_000, OutletStatus::Active),
            outlet("OUT002", 100_000, 85_000, OutletStatus::Warning),
        ];
        let d = day(2024, 3, 15);
        let invoices = vec![
            invoice("INV001", "OUT001", 11_000, InvoiceStatus::Approved, d),
            invoice("INV002", "OUT001", 5_500, InvoiceStatus::Pending, d),
        ];

        let forward = compute_dashboard_stats(&inventory, &invoices, &outlets);

        let mut rev_inv: Vec<Product> = inventory.clone();
        rev_inv.reverse();
        let mut rev_inv2: Vec<Invoice> = invoices.clone();
        rev_inv2.reverse();
        let mut rev_out: Vec<Outlet> = outlets.clone();
        rev_out.reverse();
        let reversed = compute_dashboard_stats(&rev_inv, &rev_inv2, &rev_out);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_empty_collections() {
        let stats = compute_dashboard_stats(&[], &[], &[]);
        assert_eq!(stats.total_stock_value, Money::zero());
        assert_eq!(stats.low_stock_items, 0);
        assert_eq!(stats.total_sales, Money::zero());
    }

    #[test]
    fn test_today_sales_filters_date_and_status() {
        let today = day(2024, 3, 15);
        let yesterday = day(2024, 3, 14);
        let invoices = vec![
            invoice("INV001", "OUT001", 11_000, InvoiceStatus::Approved, today),
            invoice("INV002", "OUT001", 5_500, InvoiceStatus::Pending, today),
            invoice("INV003", "OUT001", 2_200, InvoiceStatus::Approved, yesterday),
        ];
        assert_eq!(today_sales(&invoices, today).cents(), 11_000);
    }

    #[test]
    fn test_outlet_stats() {
        let target = outlet("OUT001", 500_000, 125_000, OutletStatus::Active);
        let d = day(2024, 3, 15);
        let invoices = vec![
            invoice("INV001", "OUT001", 11_000, InvoiceStatus::Approved, d),
            invoice("INV002", "OUT001", 5_500, InvoiceStatus::Pending, d),
            invoice("INV003", "OUT002", 99_000, InvoiceStatus::Approved, d),
        ];

        let stats = outlet_stats(&target, &invoices);
        assert_eq!(stats.total_invoices, 2);
        assert_eq!(stats.approved_invoices, 1);
        assert_eq!(stats.pending_invoices, 1);
        assert_eq!(stats.total_purchases.cents(), 11_000);
        assert!((stats.credit_utilization - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_outlet_stats_zero_limit_has_zero_utilization() {
        let target = outlet("OUT009", 0, 0, OutletStatus::Active);
        let stats = outlet_stats(&target, &[]);
        assert_eq!(stats.credit_utilization, 0.0);
    }

    #[test]
    fn test_product_stats_counts_approved_lines_only() {
        let target = product("P001", 2599, 150, 50);
        let d = day(2024, 3, 15);

        let line = InvoiceItem {
            product_id: "P001".to_string(),
            sku: "SKU-P001".to_string(),
            name: "Product P001".to_string(),
            price: Money::from_cents(2599),
            quantity: 4,
            available: 150,
        };

        let mut approved = invoice("INV001", "OUT001", 11_000, InvoiceStatus::Approved, d);
        approved.items = vec![line.clone()];
        let mut pending = invoice("INV002", "OUT001", 5_500, InvoiceStatus::Pending, d);
        pending.items = vec![line];

        let stats = product_stats(&target, &[approved, pending]);
        assert_eq!(stats.total_sold, 4);
        assert_eq!(stats.total_revenue.cents(), 2599 * 4);
        assert_eq!(stats.current_stock, 150);
        assert_eq!(stats.stock_value.cents(), 2599 * 150);
    }
}

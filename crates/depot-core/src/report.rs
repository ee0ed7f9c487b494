//! # Report Formatter
//!
//! Reshapes the business collections into flat rows and renders them as CSV
//! for download.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Report Export Flow                                │
//! │                                                                         │
//! │  User clicks "Download CSV" on a report card                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate_report(kind, inventory, invoices, outlets)                   │
//! │       │                                                                 │
//! │       ├── shape rows (typed structs, human column names)               │
//! │       │                                                                 │
//! │       ├── rows empty? → CoreError::EmptyReport                         │
//! │       │                  (UI shows "no data available", never a crash) │
//! │       ▼                                                                 │
//! │  csv::Writer into an in-memory buffer (RFC4180 quoting)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Report { filename, csv, row_count }                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Browser download mechanism (external collaborator)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cell Conventions
//! - Money cells are plain decimal strings (`25.99`), no currency symbol
//! - Missing optional fields render as empty string or `0`, never null
//! - Column headers come from serde renames on the row structs, so the
//!   header row is always the same fixed, ordered field set

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classify::classify_credit;
use crate::error::{CoreError, CoreResult};
use crate::types::{Invoice, Outlet, Product};

// =============================================================================
// Report Kind
// =============================================================================

/// The four downloadable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReportKind {
    Inventory,
    Sales,
    Outlets,
    Credit,
}

impl ReportKind {
    /// Download filename for this report.
    pub fn filename(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory_report.csv",
            ReportKind::Sales => "sales_report.csv",
            ReportKind::Outlets => "outlets_report.csv",
            ReportKind::Credit => "credit_report.csv",
        }
    }

    /// Lowercase label for user-facing messages ("no data available for ...").
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory",
            ReportKind::Sales => "sales",
            ReportKind::Outlets => "outlets",
            ReportKind::Credit => "credit",
        }
    }
}

// =============================================================================
// Row Shapes
// =============================================================================

/// One inventory report row.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRow {
    #[serde(rename = "Product Name")]
    pub name: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Min Stock")]
    pub min_stock: i64,
    #[serde(rename = "Location")]
    pub location: String,
}

/// One sales report row (one invoice).
#[derive(Debug, Clone, Serialize)]
pub struct SalesRow {
    #[serde(rename = "Invoice ID")]
    pub id: String,
    #[serde(rename = "Outlet")]
    pub outlet: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Payment")]
    pub payment: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
}

/// One outlets report row.
#[derive(Debug, Clone, Serialize)]
pub struct OutletRow {
    #[serde(rename = "Outlet Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub outlet_type: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Credit Limit")]
    pub credit_limit: String,
    #[serde(rename = "Current Due")]
    pub current_due: String,
    #[serde(rename = "Available Credit")]
    pub available_credit: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// One credit report row: the outlets collection viewed through the
/// utilization bands.
#[derive(Debug, Clone, Serialize)]
pub struct CreditRow {
    #[serde(rename = "Outlet Name")]
    pub name: String,
    #[serde(rename = "Credit Limit")]
    pub credit_limit: String,
    #[serde(rename = "Current Due")]
    pub current_due: String,
    #[serde(rename = "Utilization %")]
    pub utilization: String,
    #[serde(rename = "Standing")]
    pub standing: String,
    #[serde(rename = "Status")]
    pub status: String,
}

// =============================================================================
// Row Builders
// =============================================================================

/// Shapes the inventory collection into report rows.
pub fn inventory_rows(inventory: &[Product]) -> Vec<InventoryRow> {
    inventory
        .iter()
        .map(|p| InventoryRow {
            name: p.name.clone(),
            sku: p.sku.clone(),
            category: p.category.clone(),
            quantity: p.quantity,
            unit: p.unit.clone(),
            price: p.price.to_decimal_string(),
            min_stock: p.min_stock,
            location: p.location(),
        })
        .collect()
}

/// Shapes the invoices collection into sales report rows.
pub fn sales_rows(invoices: &[Invoice]) -> Vec<SalesRow> {
    invoices
        .iter()
        .map(|inv| SalesRow {
            id: inv.id.clone(),
            outlet: inv.outlet_name.clone(),
            date: inv.date.to_string(),
            amount: inv.total.to_decimal_string(),
            status: inv.status.to_string(),
            payment: inv.payment.to_string(),
            due_date: inv.due_date.map(|d| d.to_string()).unwrap_or_default(),
        })
        .collect()
}

/// Shapes the outlets collection into report rows.
pub fn outlet_rows(outlets: &[Outlet]) -> Vec<OutletRow> {
    outlets
        .iter()
        .map(|o| OutletRow {
            name: o.name.clone(),
            outlet_type: o.outlet_type.clone(),
            phone: o.phone.clone(),
            credit_limit: o.credit_limit.to_decimal_string(),
            current_due: o.current_due.to_decimal_string(),
            available_credit: o.available_credit().to_decimal_string(),
            status: o.status.to_string(),
        })
        .collect()
}

/// Shapes the outlets collection into credit report rows.
pub fn credit_rows(outlets: &[Outlet]) -> Vec<CreditRow> {
    outlets
        .iter()
        .map(|o| {
            let utilization = if o.credit_limit.is_positive() {
                o.current_due.cents() as f64 / o.credit_limit.cents() as f64 * 100.0
            } else {
                0.0
            };
            CreditRow {
                name: o.name.clone(),
                credit_limit: o.credit_limit.to_decimal_string(),
                current_due: o.current_due.to_decimal_string(),
                utilization: format!("{utilization:.1}"),
                standing: classify_credit(o.current_due, o.credit_limit).to_string(),
                status: o.status.to_string(),
            }
        })
        .collect()
}

// =============================================================================
// CSV Rendering
// =============================================================================

/// Renders rows as UTF-8, comma-delimited CSV with a header row.
///
/// Quoting is RFC4180: cells containing commas or quotes are wrapped in
/// quotes with internal quotes doubled (the csv crate's default).
///
/// ## Errors
/// - [`CoreError::EmptyReport`] when there are no rows; the caller turns
///   this into a user-visible "no data" message rather than an empty file.
pub fn to_csv<T: Serialize>(kind: ReportKind, rows: &[T]) -> CoreResult<String> {
    if rows.is_empty() {
        return Err(CoreError::EmptyReport {
            kind: kind.label().to_string(),
        });
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CoreError::ReportSerialization(e.to_string()))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| CoreError::ReportSerialization(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| CoreError::ReportSerialization(e.to_string()))
}

// =============================================================================
// Report Bundling
// =============================================================================

/// A rendered report, ready for the download mechanism.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: ReportKind,
    pub filename: String,
    pub csv: String,
    pub row_count: usize,
}

/// Shapes and renders the requested report from the raw collections.
pub fn generate_report(
    kind: ReportKind,
    inventory: &[Product],
    invoices: &[Invoice],
    outlets: &[Outlet],
) -> CoreResult<Report> {
    let (csv, row_count) = match kind {
        ReportKind::Inventory => {
            let rows = inventory_rows(inventory);
            (to_csv(kind, &rows)?, rows.len())
        }
        ReportKind::Sales => {
            let rows = sales_rows(invoices);
            (to_csv(kind, &rows)?, rows.len())
        }
        ReportKind::Outlets => {
            let rows = outlet_rows(outlets);
            (to_csv(kind, &rows)?, rows.len())
        }
        ReportKind::Credit => {
            let rows = credit_rows(outlets);
            (to_csv(kind, &rows)?, rows.len())
        }
    };

    Ok(Report {
        kind,
        filename: kind.filename().to_string(),
        csv,
        row_count,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

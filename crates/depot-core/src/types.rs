//! # Domain Types
//!
//! Core domain types used throughout the Depot store manager.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Outlet      │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id "P001"      │   │  id "OUT001"    │   │  id "INV001"    │       │
//! │  │  sku (business) │   │  credit_limit   │   │  items (frozen) │       │
//! │  │  price (cents)  │   │  current_due    │   │  subtotal/tax   │       │
//! │  │  min_stock      │   │  status         │   │  status/payment │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OutletStatus   │   │  InvoiceStatus  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Active         │   │  Pending        │   │  Credit         │       │
//! │  │  Warning        │   │  Approved       │   │  Cash           │       │
//! │  │  Blocked        │   │  Rejected       │   │  Online         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record carries a zero-padded sequential business id (`P001`,
//! `OUT001`, `INV001`) issued by the storage layer from a persistent
//! counter. The ids are stable, human-readable, and never reused.
//!
//! ## Serialization
//! These structs ARE the stored shape: each collection persists as a JSON
//! array of them under a single key. Field names use camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10.00% (the flat invoice tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Manager Profile
// =============================================================================

/// The store manager profile. Singleton, read-mostly, written at seed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Business id of the store this manager runs.
    pub store_id: String,
    pub store_name: String,
    pub location: String,
    pub phone: String,
    #[ts(as = "String")]
    pub joined_date: NaiveDate,
}

// =============================================================================
// Product
// =============================================================================

/// A product held in the store's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Business id, e.g. "P001".
    pub id: String,

    /// Display name shown on the dashboard and in reports.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Category for grouping and filtering (e.g. "Grains", "Frozen").
    pub category: String,

    /// Unit price in cents.
    pub price: Money,

    /// Units currently on hand. Never negative.
    pub quantity: i64,

    /// Unit of measure for `quantity` (e.g. "bags", "bottles").
    pub unit: String,

    /// Reorder floor. Always positive; stock classification divides by it.
    pub min_stock: i64,

    /// Room the product is stored in, when placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    /// Rack within the room, for shelf-stable goods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack: Option<String>,

    /// Freezer unit, for frozen goods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freezer: Option<String>,
}

impl Product {
    /// Total value of the units on hand (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Whether the product has fallen below its reorder floor.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_stock
    }

    /// Human-readable storage location: the non-empty of room/rack/freezer
    /// joined by spaces. Empty string when the product is unplaced.
    ///
    /// ## Example
    /// ```rust
    /// # use depot_core::types::Product;
    /// # use depot_core::money::Money;
    /// let p = Product {
    ///     id: "P001".into(), name: "Premium Rice 5kg".into(),
    ///     sku: "RIC001".into(), category: "Grains".into(),
    ///     price: Money::from_cents(2599), quantity: 150,
    ///     unit: "bags".into(), min_stock: 50,
    ///     room: Some("Room A".into()), rack: Some("R01".into()), freezer: None,
    /// };
    /// assert_eq!(p.location(), "Room A R01");
    /// ```
    pub fn location(&self) -> String {
        [&self.room, &self.rack, &self.freezer]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Outlet
// =============================================================================

/// Derived outlet standing relative to its credit limit.
///
/// Always recomputed from `current_due / credit_limit` whenever the due
/// changes; never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OutletStatus {
    /// Below 80% of the credit limit.
    Active,
    /// At or above 80% of the credit limit.
    Warning,
    /// At or above 100% of the credit limit; cannot receive new invoices.
    Blocked,
}

impl fmt::Display for OutletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutletStatus::Active => "Active",
            OutletStatus::Warning => "Warning",
            OutletStatus::Blocked => "Blocked",
        };
        write!(f, "{label}")
    }
}

/// A retail outlet the store supplies on credit terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Outlet {
    /// Business id, e.g. "OUT001".
    pub id: String,

    pub name: String,

    /// Outlet classification (e.g. "Official", "Dummy").
    #[serde(rename = "type")]
    pub outlet_type: String,

    pub phone: String,

    /// Maximum credit the outlet may carry.
    pub credit_limit: Money,

    /// Outstanding balance. Raised by credit invoices; a payment-recording
    /// path does not exist in this system.
    pub current_due: Money,

    /// Derived from due/limit; see [`crate::classify::outlet_status`].
    pub status: OutletStatus,
}

impl Outlet {
    /// Credit still available before the limit: `credit_limit - current_due`.
    #[inline]
    pub fn available_credit(&self) -> Money {
        self.credit_limit - self.current_due
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// How an invoice is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Billed against the outlet's credit line (raises current due).
    Credit,
    /// Settled in cash on delivery.
    Cash,
    /// Settled via online transfer.
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Online => "Online",
        };
        write!(f, "{label}")
    }
}

/// The approval state of an invoice.
///
/// Submission always creates `Pending`; the Approved/Rejected transition is
/// asserted by the admin side through the repository, never by submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InvoiceStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Approved => "Approved",
            InvoiceStatus::Rejected => "Rejected",
        };
        write!(f, "{label}")
    }
}

/// A line item on an invoice.
/// Uses the snapshot pattern to freeze product data at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceItem {
    pub product_id: String,

    /// SKU at submission time (frozen).
    pub sku: String,

    /// Product name at submission time (frozen).
    pub name: String,

    /// Unit price in cents at submission time (frozen).
    pub price: Money,

    /// Quantity invoiced.
    pub quantity: i64,

    /// Stock on hand when the invoice was submitted, for approval review.
    pub available: i64,
}

impl InvoiceItem {
    /// Line total before tax (price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// An invoice raised against an outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Business id, e.g. "INV001".
    pub id: String,

    pub outlet_id: String,

    /// Outlet name at submission time (frozen for display).
    pub outlet_name: String,

    /// Business date of the invoice.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Payment deadline for credit invoices, when agreed.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    pub items: Vec<InvoiceItem>,

    /// Sum of line totals.
    pub subtotal: Money,

    /// Flat invoice tax on the subtotal.
    pub tax: Money,

    /// `subtotal + tax`.
    pub total: Money,

    pub payment: PaymentMethod,

    pub status: InvoiceStatus,

    /// Rejection reason, set when status becomes Rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Classification Labels
// =============================================================================

/// Stock level relative to the reorder floor (`quantity / min_stock`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockLevel {
    /// Below 50% of the floor.
    Critical,
    /// Below 80% of the floor.
    Low,
    /// Below 120% of the floor.
    Normal,
    /// At or above 120% of the floor.
    Good,
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockLevel::Critical => "Critical",
            StockLevel::Low => "Low",
            StockLevel::Normal => "Normal",
            StockLevel::Good => "Good",
        };
        write!(f, "{label}")
    }
}

/// Credit utilization band (`current_due / credit_limit`).
///
/// Finer-grained than [`OutletStatus`]; used on the credit report where the
/// 30/60 bands matter to the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CreditStanding {
    /// Below 30% utilization.
    Good,
    /// Below 60% utilization.
    Moderate,
    /// Below 80% utilization.
    High,
    /// Below 100% utilization.
    Critical,
    /// At or above 100% utilization.
    Exceeded,
}

impl fmt::Display for CreditStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreditStanding::Good => "Good",
            CreditStanding::Moderate => "Moderate",
            CreditStanding::High => "High",
            CreditStanding::Critical => "Critical",
            CreditStanding::Exceeded => "Exceeded",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_product(room: Option<&str>, rack: Option<&str>, freezer: Option<&str>) -> Product {
        Product {
            id: "P001".to_string(),
            name: "Premium Rice 5kg".to_string(),
            sku: "RIC001".to_string(),
            category: "Grains".to_string(),
            price: Money::from_cents(2599),
            quantity: 150,
            unit: "bags".to_string(),
            min_stock: 50,
            room: room.map(String::from),
            rack: rack.map(String::from),
            freezer: freezer.map(String::from),
        }
    }

    #[test]
    fn test_location_joins_present_fields() {
        let p = placed_product(Some("Room A"), Some("R01"), None);
        assert_eq!(p.location(), "Room A R01");

        let frozen = placed_product(Some("Freezer Room"), None, Some("F01"));
        assert_eq!(frozen.location(), "Freezer Room F01");

        let unplaced = placed_product(None, None, None);
        assert_eq!(unplaced.location(), "");
    }

    #[test]
    fn test_stock_value() {
        let p = placed_product(None, None, None);
        assert_eq!(p.stock_value().cents(), 2599 * 150);
    }

    #[test]
    fn test_low_stock_is_strict() {
        let mut p = placed_product(None, None, None);
        p.quantity = 50;
        assert!(!p.is_low_stock()); // exactly at the floor is not low
        p.quantity = 49;
        assert!(p.is_low_stock());
    }

    #[test]
    fn test_available_credit() {
        let outlet = Outlet {
            id: "OUT001".to_string(),
            name: "Harbor Street Supermarket".to_string(),
            outlet_type: "Official".to_string(),
            phone: "+1 234-567-8901".to_string(),
            credit_limit: Money::from_cents(500_000),
            current_due: Money::from_cents(125_000),
            status: OutletStatus::Active,
        };
        assert_eq!(outlet.available_credit().cents(), 375_000);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OutletStatus::Warning.to_string(), "Warning");
        assert_eq!(InvoiceStatus::Pending.to_string(), "Pending");
        assert_eq!(PaymentMethod::Credit.to_string(), "Credit");
        assert_eq!(StockLevel::Critical.to_string(), "Critical");
        assert_eq!(CreditStanding::Exceeded.to_string(), "Exceeded");
    }

    #[test]
    fn test_outlet_type_serializes_as_type() {
        let outlet = Outlet {
            id: "OUT001".to_string(),
            name: "Harbor Street Supermarket".to_string(),
            outlet_type: "Official".to_string(),
            phone: "+1 234-567-8901".to_string(),
            credit_limit: Money::from_cents(500_000),
            current_due: Money::zero(),
            status: OutletStatus::Active,
        };
        let json = serde_json::to_value(&outlet).unwrap();
        assert_eq!(json["type"], "Official");
        assert_eq!(json["creditLimit"], 500_000);
        assert_eq!(json["status"], "Active");
    }
}

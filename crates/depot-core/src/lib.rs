//! # depot-core: Pure Business Logic for the Depot Store Manager
//!
//! This crate is the **heart** of the Depot store manager. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Depot Store Manager Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Browser Dashboard (frontend)                   │   │
//! │  │   Dashboard ──► Inventory ──► Outlets ──► Invoices ──► Reports │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed bindings (ts-rs)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ depot-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ classify  │  │   stats   │  │   │
//! │  │   │  Product  │  │   Money   │  │ StockLvl  │  │ Dashboard │  │   │
//! │  │   │  Outlet   │  │  TaxRate  │  │ Standing  │  │  Outlet   │  │   │
//! │  │   │  Invoice  │  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   └───────────┘  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │                  │  invoice  │  │  report   │  │ validation│  │   │
//! │  │                  │  drafts   │  │ CSV rows  │  │   rules   │  │   │
//! │  │                  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  depot-store (Storage Layer)                    │   │
//! │  │          SQLite key-value store, repositories, workflow         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Outlet, Invoice, Manager)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`classify`] - Stock-level and credit-standing classification
//! - [`stats`] - Dashboard / outlet / product aggregates
//! - [`report`] - Report rows and CSV export
//! - [`invoice`] - Draft invoice validation and totals
//! - [`validation`] - Field-level validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::money::Money;
//! use depot_core::{classify, StockLevel, INVOICE_TAX_RATE};
//!
//! // Invoices carry a flat 10% tax
//! let subtotal = Money::from_cents(10_000); // $100.00
//! let tax = subtotal.calculate_tax(INVOICE_TAX_RATE);
//! assert_eq!(tax.cents(), 1_000); // $10.00
//!
//! // Stock classification: 40 on hand against a floor of 100 is critical
//! assert_eq!(classify::classify_stock(40, 100), StockLevel::Critical);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod error;
pub mod invoice;
pub mod money;
pub mod report;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use depot_core::Money` instead of
// `use depot_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat tax rate applied to every invoice, in basis points (1000 = 10%).
///
/// ## Why a constant?
/// The store bills a single jurisdiction-wide rate today. Keeping it here
/// (rather than per-product) means invoice totals are reproducible from the
/// line items alone. Can be made configurable per store in a later version.
pub const INVOICE_TAX_RATE: types::TaxRate = types::TaxRate::from_bps(1000);

/// Maximum line items allowed on a single invoice.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps approval screens reviewable.
pub const MAX_INVOICE_ITEMS: usize = 100;

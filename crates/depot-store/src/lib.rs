//! # depot-store: Storage Layer for the Depot Store Manager
//!
//! This crate provides persistence for the Depot store manager. All state
//! lives in a SQLite-backed JSON key-value store: four named collections
//! plus a login flag and the id counters.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Depot Store Manager Data Flow                       │
//! │                                                                         │
//! │  Dashboard action (submit invoice, edit product, export report)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    depot-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │   Workflow   │  │   │
//! │  │   │   (pool.rs)   │    │ manager.rs    │    │ (submission  │  │   │
//! │  │   │               │    │ inventory.rs  │    │  transaction)│  │   │
//! │  │   │ SqlitePool    │◄───│ outlet.rs     │    │              │  │   │
//! │  │   │ Migrations    │    │ invoice.rs    │    │ seed / reset │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: store_entries(key, value) - one JSON doc per key     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the `Store` handle
//! - [`kv`] - JSON document read/write and sequence counters
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - One repository per collection
//! - [`workflow`] - The invoice submission transaction
//! - [`seed`] - The fixed initial dataset and seed/reset lifecycle
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depot_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("./depot.db")).await?;
//! store.seed().await?; // idempotent
//!
//! let stats = depot_core::stats::compute_dashboard_stats(
//!     &store.inventory().list().await?,
//!     &store.invoices().list().await?,
//!     &store.outlets().list().await?,
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository and workflow re-exports for convenience
pub use repository::inventory::{InventoryRepository, NewProduct, ProductPatch};
pub use repository::invoice::{InvoiceRepository, NewInvoice};
pub use repository::manager::ManagerRepository;
pub use repository::outlet::{NewOutlet, OutletRepository};
pub use workflow::SubmitInvoice;

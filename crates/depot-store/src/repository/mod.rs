//! # Repository Module
//!
//! One repository per collection, each a thin struct over the pool.
//!
//! ## Repository Organization
//! ```text
//! repository/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── manager.rs   ◄─── Manager profile + login flag
//! ├── inventory.rs ◄─── Products: CRUD, search, stock filters
//! ├── outlet.rs    ◄─── Outlets: CRUD, credit due updates
//! └── invoice.rs   ◄─── Invoices: insert, status transitions, filters
//! ```
//!
//! ## Mutation Pattern
//! Every mutator is a whole-collection read-modify-write:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN TRANSACTION                                                      │
//! │    read_json(collection key)    ← whole JSON document                   │
//! │    edit in memory               ← find/merge/recompute                  │
//! │    write_json(collection key)   ← whole JSON document                   │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Collections are tens-to-hundreds of records; rewriting the document   │
//! │  is cheaper than a schema and keeps the stored shape identical to the  │
//! │  domain types.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Methods ending in `_in` take a `&mut SqliteConnection` so the invoice
//! workflow can thread one transaction through several collections.

pub mod inventory;
pub mod invoice;
pub mod manager;
pub mod outlet;

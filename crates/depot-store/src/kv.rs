//! # JSON Key-Value Access
//!
//! The persistence primitive: every collection is one JSON document stored
//! under a fixed key in the `store_entries` table.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      store_entries                                      │
//! │                                                                         │
//! │  key                    │ value                                         │
//! │  ──────────────────────────────────────────────────────────────────     │
//! │  manager_data           │ { "id": "M001", "name": ... }                 │
//! │  manager_inventory      │ [ { "id": "P001", ... }, ... ]                │
//! │  manager_outlets        │ [ { "id": "OUT001", ... }, ... ]              │
//! │  manager_invoices       │ [ { "id": "INV005", ... }, ... ]              │
//! │  manager_login_status   │ false                                         │
//! │  seq_product            │ 7                                             │
//! │  seq_outlet             │ 4                                             │
//! │  seq_invoice            │ 5                                             │
//! │                                                                         │
//! │  A mutation reads the whole document, edits it in memory, and writes   │
//! │  it back - inside a transaction when more than one key is touched.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Executor Generics
//! The helpers are generic over `sqlx::Executor`, so the same functions
//! serve plain pool calls and transaction bodies. Repository methods that
//! touch one key run against the pool; the invoice workflow threads a
//! single transaction through every key it touches.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Sqlite, SqliteConnection};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Storage Keys
// =============================================================================

/// Fixed storage keys for the collections and counters.
pub mod keys {
    /// Manager profile (single JSON object).
    pub const MANAGER: &str = "manager_data";
    /// Inventory collection (JSON array of Product).
    pub const INVENTORY: &str = "manager_inventory";
    /// Outlets collection (JSON array of Outlet).
    pub const OUTLETS: &str = "manager_outlets";
    /// Invoices collection (JSON array of Invoice, newest first).
    pub const INVOICES: &str = "manager_invoices";
    /// Login flag (JSON boolean).
    pub const LOGIN_STATUS: &str = "manager_login_status";

    /// Monotonic id counters. Never reset except by `Store::reset`, so ids
    /// survive deletions without reuse.
    pub const PRODUCT_SEQ: &str = "seq_product";
    pub const OUTLET_SEQ: &str = "seq_outlet";
    pub const INVOICE_SEQ: &str = "seq_invoice";
}

// =============================================================================
// Document Access
// =============================================================================

/// Reads and deserializes the JSON document under `key`.
///
/// Returns `None` when the key has never been written - callers map that to
/// their collection's empty value (`[]`, `false`, `0`).
pub async fn read_json<'e, E, T>(executor: E, key: &str) -> StoreResult<Option<T>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
    T: DeserializeOwned,
{
    let raw: Option<String> =
        sqlx::query_scalar("SELECT value FROM store_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(executor)
            .await?;

    match raw {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StoreError::serialization(key, e)),
        None => Ok(None),
    }
}

/// Serializes `value` and writes it under `key`, replacing any prior value.
///
/// A single upsert, so the write is atomic from the caller's perspective -
/// a reader sees either the old document or the new one, never a partial.
pub async fn write_json<'e, E, T>(executor: E, key: &str, value: &T) -> StoreResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StoreError::serialization(key, e))?;

    sqlx::query(
        "INSERT INTO store_entries (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(json)
    .execute(executor)
    .await?;

    Ok(())
}

/// Checks whether `key` has ever been written.
pub async fn exists<'e, E>(executor: E, key: &str) -> StoreResult<bool>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_entries WHERE key = ?1")
        .bind(key)
        .fetch_one(executor)
        .await?;

    Ok(count > 0)
}

/// Increments and returns the counter under `key` (first call yields 1).
///
/// Takes a `&mut SqliteConnection` rather than a pool: the read-increment-
/// write must sit inside the caller's transaction so two inserts can never
/// observe the same value.
pub async fn next_sequence(conn: &mut SqliteConnection, key: &str) -> StoreResult<i64> {
    let current: i64 = read_json(&mut *conn, key).await?.unwrap_or(0);
    let next = current + 1;
    write_json(&mut *conn, key, &next).await?;
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================

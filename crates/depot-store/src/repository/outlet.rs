//! # Outlet Repository
//!
//! Storage operations for the outlet collection.
//!
//! ## Credit Due Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Outlet Due Update Strategy                           │
//! │                                                                         │
//! │  ❌ WRONG: write an absolute due and a hand-picked status              │
//! │     outlet.current_due = 105_000; outlet.status = Warning;             │
//! │                                                                         │
//! │  ✅ CORRECT: apply a delta and DERIVE the status                       │
//! │     update_due("OUT001", Money::from_cents(85_000))                    │
//! │       new_due = current_due + delta                                    │
//! │       status  = outlet_status(new_due, credit_limit)                   │
//! │                                                                         │
//! │  The status column is never trusted as input; every due change        │
//! │  recomputes it from the ratio, so the two can never drift apart.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no payment-recording path: nothing in the dashboard decrements
//! a due. Negative deltas are accepted so an external settlement process
//! can clear balances through the same derivation.

use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::{self, keys};
use depot_core::classify::outlet_status;
use depot_core::validation::{validate_credit_limit, validate_name, validate_phone, validate_search_query};
use depot_core::{Money, Outlet, OutletStatus};

// =============================================================================
// Input Shape
// =============================================================================

/// Fields for a new outlet; the repository issues the id and derives the
/// initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOutlet {
    pub name: String,
    #[serde(rename = "type")]
    pub outlet_type: String,
    pub phone: String,
    pub credit_limit: Money,
    /// Opening balance carried over from outside the system, if any.
    #[serde(default)]
    pub current_due: Money,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for outlet storage operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.outlets();
/// let outlet = repo.update_due("OUT001", Money::from_cents(85_000)).await?;
/// assert_eq!(outlet.status, OutletStatus::Warning);
/// ```
#[derive(Debug, Clone)]
pub struct OutletRepository {
    pool: SqlitePool,
}

impl OutletRepository {
    /// Creates a new OutletRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OutletRepository { pool }
    }

    /// Lists all outlets. Empty vec when the store is unseeded.
    pub async fn list(&self) -> StoreResult<Vec<Outlet>> {
        Ok(kv::read_json(&self.pool, keys::OUTLETS)
            .await?
            .unwrap_or_default())
    }

    /// Replaces the whole outlet collection.
    pub async fn set_all(&self, outlets: &[Outlet]) -> StoreResult<()> {
        kv::write_json(&self.pool, keys::OUTLETS, outlets).await
    }

    /// Gets an outlet by its id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Outlet>> {
        Ok(self.list().await?.into_iter().find(|o| o.id == id))
    }

    /// Adds an outlet, issuing the next `OUT{n:03}` id.
    ///
    /// The initial status is derived from the opening due and the limit,
    /// never taken from the caller.
    pub async fn add(&self, new: NewOutlet) -> StoreResult<Outlet> {
        debug!(name = %new.name, "Adding outlet");

        validate_name("name", &new.name)?;
        validate_phone(&new.phone)?;
        validate_credit_limit(new.credit_limit)?;

        let mut tx = self.pool.begin().await?;

        let mut outlets: Vec<Outlet> = kv::read_json(&mut *tx, keys::OUTLETS)
            .await?
            .unwrap_or_default();

        let seq = kv::next_sequence(&mut tx, keys::OUTLET_SEQ).await?;
        let outlet = Outlet {
            id: format!("OUT{seq:03}"),
            name: new.name,
            outlet_type: new.outlet_type,
            phone: new.phone,
            credit_limit: new.credit_limit,
            current_due: new.current_due,
            status: outlet_status(new.current_due, new.credit_limit),
        };

        outlets.push(outlet.clone());
        kv::write_json(&mut *tx, keys::OUTLETS, &outlets).await?;
        tx.commit().await?;

        debug!(id = %outlet.id, status = %outlet.status, "Outlet added");
        Ok(outlet)
    }

    /// Applies a delta to the outlet's due and recomputes its status.
    ///
    /// ## Errors
    /// - `StoreError::NotFound` on an unknown id
    pub async fn update_due(&self, id: &str, delta: Money) -> StoreResult<Outlet> {
        debug!(id = %id, delta = %delta, "Updating outlet due");

        let mut tx = self.pool.begin().await?;
        let outlet = Self::apply_due_in(&mut tx, id, delta).await?;
        tx.commit().await?;

        Ok(outlet)
    }

    /// Case-insensitive substring search over name, type and id.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Outlet>> {
        let query = validate_search_query(query)?.to_lowercase();

        let outlets = self.list().await?;
        if query.is_empty() {
            return Ok(outlets);
        }

        Ok(outlets
            .into_iter()
            .filter(|o| {
                o.name.to_lowercase().contains(&query)
                    || o.outlet_type.to_lowercase().contains(&query)
                    || o.id.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Outlets in Active standing.
    pub async fn active(&self) -> StoreResult<Vec<Outlet>> {
        self.by_status(OutletStatus::Active).await
    }

    /// Outlets in Warning standing.
    pub async fn warning(&self) -> StoreResult<Vec<Outlet>> {
        self.by_status(OutletStatus::Warning).await
    }

    /// Blocked outlets.
    pub async fn blocked(&self) -> StoreResult<Vec<Outlet>> {
        self.by_status(OutletStatus::Blocked).await
    }

    async fn by_status(&self, status: OutletStatus) -> StoreResult<Vec<Outlet>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.status == status)
            .collect())
    }

    /// Due update inside the caller's transaction; the invoice workflow
    /// uses this so the raise commits (or rolls back) with the invoice.
    pub(crate) async fn apply_due_in(
        conn: &mut SqliteConnection,
        id: &str,
        delta: Money,
    ) -> StoreResult<Outlet> {
        let mut outlets: Vec<Outlet> = kv::read_json(&mut *conn, keys::OUTLETS)
            .await?
            .unwrap_or_default();

        let outlet = outlets
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::not_found("Outlet", id))?;

        outlet.current_due += delta;
        outlet.status = outlet_status(outlet.current_due, outlet.credit_limit);
        let updated = outlet.clone();

        kv::write_json(&mut *conn, keys::OUTLETS, &outlets).await?;
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

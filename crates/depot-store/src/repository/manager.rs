//! # Manager Repository
//!
//! Storage operations for the manager profile singleton and the login flag.
//!
//! The profile is read-mostly: written at seed time (and by the external
//! login flow), read by every screen header. The login flag is a plain
//! boolean under its own key so clearing it never rewrites the profile.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::kv::{self, keys};
use depot_core::Manager;

/// Repository for the manager profile and login state.
#[derive(Debug, Clone)]
pub struct ManagerRepository {
    pool: SqlitePool,
}

impl ManagerRepository {
    /// Creates a new ManagerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ManagerRepository { pool }
    }

    /// Gets the manager profile.
    ///
    /// ## Returns
    /// * `Ok(Some(Manager))` - profile present
    /// * `Ok(None)` - store never seeded; callers treat as "not signed in"
    pub async fn get(&self) -> StoreResult<Option<Manager>> {
        kv::read_json(&self.pool, keys::MANAGER).await
    }

    /// Replaces the manager profile.
    pub async fn set(&self, manager: &Manager) -> StoreResult<()> {
        debug!(id = %manager.id, "Setting manager profile");
        kv::write_json(&self.pool, keys::MANAGER, manager).await
    }

    /// Whether the manager is currently logged in. Defaults to false when
    /// the flag has never been written.
    pub async fn is_logged_in(&self) -> StoreResult<bool> {
        Ok(kv::read_json(&self.pool, keys::LOGIN_STATUS)
            .await?
            .unwrap_or(false))
    }

    /// Sets the login flag.
    pub async fn set_logged_in(&self, logged_in: bool) -> StoreResult<()> {
        debug!(logged_in, "Setting login status");
        kv::write_json(&self.pool, keys::LOGIN_STATUS, &logged_in).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

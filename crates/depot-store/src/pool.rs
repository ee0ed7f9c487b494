//! # Store Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Connection Pool                              │
//! │                                                                         │
//! │  Dashboard backend startup                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config).await ← Create pool + run migrations + seed        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐                │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...            │                           │
//! │  │  └─────┘ └─────┘ └─────┘                │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  managers() / inventory() / outlets() / invoices()                     │
//! │                                                                         │
//! │  SINGLE WRITER: the dashboard is one user in one window. The pool      │
//! │  exists for connection reuse, not concurrency; two dashboards against  │
//! │  one database are last-writer-wins by design.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for better crash
//! recovery and so reads never block the occasional write.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::inventory::InventoryRepository;
use crate::repository::manager::ManagerRepository;
use crate::repository::outlet::OutletRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/depot.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-user dashboard)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = Store::new(StoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main storage handle providing repository access.
///
/// ## Ownership
/// The `Store` exclusively owns the canonical collections; callers receive
/// disposable snapshots and re-fetch after each mutation. Constructed once
/// at process start and handed to the dashboard by reference (dependency
/// injection, not a hidden global).
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::new(StoreConfig::new("./depot.db")).await?;
/// store.seed().await?;
///
/// let inventory = store.inventory().list().await?;
/// let outlet = store.outlets().update_due("OUT001", Money::from_cents(85_000)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Store {
    /// Creates a new store connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for crash recovery
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Store)` - Ready-to-use storage handle
    /// * `Err(StoreError)` - Connection or migration failed
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing store connection"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = Store { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs database migrations.
    ///
    /// Automatically called by `new()` unless disabled in the config;
    /// idempotent either way.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running store migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced access not covered by the repositories.
    /// Prefer repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the manager-profile repository.
    pub fn managers(&self) -> ManagerRepository {
        ManagerRepository::new(self.pool.clone())
    }

    /// Returns the inventory repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let low = store.inventory().low_stock().await?;
    /// ```
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    /// Returns the outlets repository.
    pub fn outlets(&self) -> OutletRepository {
        OutletRepository::new(self.pool.clone())
    }

    /// Returns the invoices repository.
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    /// Closes the store connection pool.
    ///
    /// ## When To Call
    /// - On application shutdown
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing store connection pool");
        self.pool.close().await;
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

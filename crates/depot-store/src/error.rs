//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) / JSON Error (serde_json::Error)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       ▲                                                                 │
//! │       │                                                                 │
//! │  CoreError (depot-core) ──► StoreError::Domain ← Business rejections   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Dashboard displays a user-friendly message                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
///
/// These errors wrap sqlx/serde_json errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in a collection.
    ///
    /// ## When This Occurs
    /// - Updating a product/outlet/invoice by an unknown id
    ///
    /// Unknown-id updates surface this error rather than silently
    /// succeeding; callers that want fire-and-forget semantics can ignore
    /// it explicitly.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A stored JSON document failed to serialize or deserialize.
    ///
    /// ## When This Occurs
    /// - Hand-edited database content
    /// - Reading a collection written by an incompatible build
    #[error("Serialization failed for '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed to commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),

    /// A business rule rejected the operation before anything was written.
    ///
    /// Raised by validating mutators (add/update) and by invoice
    /// submission; the inner [`depot_core::CoreError`] carries the
    /// user-facing message.
    #[error(transparent)]
    Domain(#[from] depot_core::CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Serialization error for a given storage key.
    pub fn serialization(key: impl Into<String>, err: serde_json::Error) -> Self {
        StoreError::Serialization {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// sqlx::Error::Database       → StoreError::QueryFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Field validation failures flow through the domain error.
impl From<depot_core::ValidationError> for StoreError {
    fn from(err: depot_core::ValidationError) -> Self {
        StoreError::Domain(err.into())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("Product", "P999");
        assert_eq!(err.to_string(), "Product not found: P999");
    }

    #[test]
    fn test_pool_errors_map_to_categories() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::PoolExhausted));

        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, StoreError::ConnectionFailed(_)));
    }
}

//! # Error Types
//!
//! Domain-specific error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  depot-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  depot-store errors (separate crate)                                   │
//! │  └── StoreError       - Storage failures; wraps CoreError as Domain    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError::Domain → Dashboard    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations raised before any write
/// happens. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Outlet cannot receive an invoice.
    ///
    /// ## When This Occurs
    /// - Outlet id doesn't resolve to a known outlet
    /// - Outlet status is Blocked (credit limit reached)
    #[error("Outlet {id} cannot be invoiced: {reason}")]
    InvalidOutlet { id: String, reason: String },

    /// A draft line references a product that doesn't exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Draft has no line items.
    #[error("Invoice must contain at least one item")]
    EmptyInvoice,

    /// Insufficient stock to fulfil a draft line.
    ///
    /// ## When This Occurs
    /// - Requested quantity exceeds the product's current stock
    ///
    /// ## User Workflow
    /// ```text
    /// Submit invoice (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "RIC001", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 RIC001 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// A credit invoice would push the outlet past its credit limit.
    ///
    /// Raised before any write; the store is untouched when this fires.
    #[error(
        "Credit limit exceeded: limit {credit_limit}, current due {current_due}, invoice {invoice_total}"
    )]
    CreditLimitExceeded {
        credit_limit: Money,
        current_due: Money,
        invoice_total: Money,
    },

    /// Report export requested with no rows to write.
    ///
    /// The caller shows a "no data available" message instead of a file.
    #[error("No data available for {kind} report")]
    EmptyReport { kind: String },

    /// CSV writer failed while shaping a report.
    ///
    /// Should not occur for the fixed row shapes; kept typed so the caller
    /// never sees a panic.
    #[error("Report serialization failed: {0}")]
    ReportSerialization(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "RIC001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for RIC001: available 3, requested 5"
        );
    }

    #[test]
    fn test_credit_limit_message_uses_money_display() {
        let err = CoreError::CreditLimitExceeded {
            credit_limit: Money::from_cents(100_000),
            current_due: Money::from_cents(90_000),
            invoice_total: Money::from_cents(11_000),
        };
        assert_eq!(
            err.to_string(),
            "Credit limit exceeded: limit $1000.00, current due $900.00, invoice $110.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustBePositive {
            field: "minStock".to_string(),
        };
        assert_eq!(err.to_string(), "minStock must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

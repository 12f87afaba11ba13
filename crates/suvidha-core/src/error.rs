//! # Error Types
//!
//! Domain-specific error types for suvidha-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  suvidha-core errors (this file)                                       │
//! │  ├── CoreError        - Billing rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  suvidha-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  suvidha-billing errors (separate crate)                               │
//! │  └── BillingError     - Core | Store, what the UI layer sees           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BillingError → operator toast     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (table id, field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Billing rule violations.
///
/// These are correctable operator input errors: the UI surfaces them as a
/// short-lived toast and the table stays in its current state. No ledger
/// mutation ever accompanies one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settle or defer was attempted on a table with no open order.
    #[error("Bill for {table} is empty, add items before settling")]
    EmptyBill { table: String },

    /// Defer was attempted without a customer name.
    #[error("Customer name is required for an Udhari bill")]
    CustomerNameRequired,

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

    /// Invalid format (e.g., malformed table id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

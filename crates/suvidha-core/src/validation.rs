//! # Validation Module
//!
//! Input validation utilities for Suvidha POS.
//!
//! ## Validation Strategy
//! The orchestrator validates operator input here BEFORE any ledger state
//! is touched, so a rejected call always leaves every ledger unchanged.
//! Quantity `<= 0` is deliberately NOT rejected by cart mutations: it is
//! the "remove this row" signal and is validated only where a positive
//! quantity is the contract.
//!
//! ## Usage
//! ```rust
//! use suvidha_core::validation::{validate_customer_name, validate_quantity};
//!
//! assert_eq!(validate_customer_name(" Asha ").unwrap(), "Asha");
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(1000).is_err());
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name for an Udhari bill.
///
/// ## Rules
/// - Must not be blank (whitespace-only counts as blank)
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a table identifier.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters (table numbers and "Parcel" both fit)
pub fn validate_table_id(table: &str) -> ValidationResult<()> {
    let table = table.trim();

    if table.is_empty() {
        return Err(ValidationError::Required {
            field: "table".to_string(),
        });
    }

    if table.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "table".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates note content.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 2000 characters
pub fn validate_note_content(content: &str) -> ValidationResult<()> {
    if content.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "note content".to_string(),
        });
    }

    if content.len() > 2000 {
        return Err(ValidationError::TooLong {
            field: "note content".to_string(),
            max: 2000,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a positive quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Callers that treat `<= 0` as "remove" must branch before calling this.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

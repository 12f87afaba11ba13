//! # suvidha-core: Pure Business Logic for Suvidha POS
//!
//! This crate is the **heart** of Suvidha POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Suvidha POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator UI (external)                       │   │
//! │  │    Table grid ──► Menu grid ──► Bill panel ──► Reports          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    suvidha-billing                              │   │
//! │  │    Billing orchestrator, ledgers, change events                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ suvidha-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  pricing  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Order   │  │ BillTotals│  │   │
//! │  │   │ records   │  │  TaxCalc  │  │ cart math │  │  tax math │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  report   │  │  export   │  │    upi    │  │ validation│  │   │
//! │  │   │  windows  │  │    CSV    │  │ pay links │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, LineItem, CreditRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - The per-table cart and its mutation rules
//! - [`pricing`] - The single source of truth for subtotal/tax/total
//! - [`report`] - Time-windowed income summaries and item sales rankings
//! - [`export`] - CSV rendering of report data
//! - [`upi`] - UPI deep-link construction for QR payment
//! - [`catalog`] - The static menu reference data
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use suvidha_core::money::Money;
//! use suvidha_core::types::TaxRate;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_paise(8000); // Rs.80.00
//!
//! // GST at the default 5% rate
//! let rate = TaxRate::default();
//! let tax = subtotal.calculate_tax(rate);
//!
//! assert_eq!(tax.paise(), 400); // Rs.4.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod money;
pub mod order;
pub mod pricing;
pub mod report;
pub mod types;
pub mod upi;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use suvidha_core::Money` instead of
// `use suvidha_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use order::Order;
pub use pricing::compute_totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate applied to every bill, in basis points (500 = 5%).
///
/// ## Why a constant?
/// The restaurant charges a single flat GST rate on all items. There is no
/// per-item tax configuration; a future multi-rate menu would move this onto
/// [`types::MenuItem`].
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// The takeaway pseudo-table.
///
/// "Parcel" behaves exactly like a dine-in table in the billing state
/// machine; only display labels differ (see [`types::table_label`]).
pub const PARCEL_TABLE: &str = "Parcel";

/// Number of physical dine-in tables.
pub const DINE_IN_TABLE_COUNT: usize = 8;

/// How long the operator-facing QR payment dialog waits before it expires.
///
/// This is a pure UI-timer bound: no ledger write has happened yet when it
/// fires, so expiry reverts to the pre-payment state without any rollback.
pub const PAYMENT_WAIT_SECS: u64 = 90;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Returns the full set of table identifiers: "1" through "8" plus "Parcel".
pub fn default_tables() -> Vec<String> {
    let mut tables: Vec<String> = (1..=DINE_IN_TABLE_COUNT).map(|n| n.to_string()).collect();
    tables.push(PARCEL_TABLE.to_string());
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let tables = default_tables();
        assert_eq!(tables.len(), 9);
        assert_eq!(tables[0], "1");
        assert_eq!(tables[7], "8");
        assert_eq!(tables[8], "Parcel");
    }
}

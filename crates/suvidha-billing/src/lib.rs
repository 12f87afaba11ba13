//! # suvidha-billing: The Billing State Machine
//!
//! This crate composes the ledgers, the pricing engine, and the collection
//! store into the billing orchestrator.
//!
//! ## Table State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Per-Table Lifecycle                                 │
//! │                                                                         │
//! │            add_item                                                     │
//! │   EMPTY ─────────────► OPEN ◄──┐                                       │
//! │     ▲                   │      │ add_item / set_quantity (>0)          │
//! │     │                   ├──────┘                                       │
//! │     │   set_quantity(last item, <=0)                                   │
//! │     ├───────────────────┤                                              │
//! │     │   clear           │                                              │
//! │     ├───────────────────┤                                              │
//! │     │   settle(method)  │──► one SettledTransaction                    │
//! │     ├───────────────────┤                                              │
//! │     │   defer(customer) │──► one active CreditRecord                   │
//! │     └───────────────────┘                                              │
//! │                                                                         │
//! │  Separate, table-independent transition:                               │
//! │                                                                         │
//! │   CreditRecord(active) ── reconcile_into_order(target) ──►             │
//! │   CreditRecord(settled)  +  target table EMPTY|OPEN ──► OPEN (merge)   │
//! │                                                                         │
//! │  settle/defer on EMPTY and defer without a customer name are           │
//! │  rejected with NO ledger mutation.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ledger`] - The in-memory ledgers (orders, credits, settlements, notes)
//! - [`orchestrator`] - The state machine and sole mutator
//! - [`events`] - Change notifications (subscribe/notify)
//! - [`receipt`] - Receipt view data for external renderers
//! - [`error`] - The combined error surface

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod ledger;
pub mod orchestrator;
pub mod receipt;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BillingError, BillingResult};
pub use events::LedgerEvent;
pub use ledger::{CreditLedger, LedgerState, NoteLedger, OrderLedger, SettlementLedger};
pub use orchestrator::{BillingConfig, BillingOrchestrator};
pub use receipt::{Receipt, ReceiptItem};

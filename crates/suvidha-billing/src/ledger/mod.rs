//! # Ledger Module
//!
//! The in-memory ledgers behind the orchestrator.
//!
//! ## Why Separate Ledger Types?
//! Instead of a single struct mixing every concern, each ledger has one
//! responsibility and its own invariants:
//!
//! 1. **OrderLedger**: sparse table → cart map; owns the "no entry for an
//!    empty cart" rule
//! 2. **CreditLedger**: append-only Udhari history; owns the single
//!    active → settled transition
//! 3. **SettlementLedger**: append-only payment history; immutable records
//! 4. **NoteLedger**: operator scratchpad, fully mutable
//!
//! All four are plain values: cloneable, comparable, serializable through
//! their contents. The orchestrator clones a ledger, mutates the clone,
//! persists it, and only then swaps it in - so these types never need
//! interior mutability or locking of their own.

mod credit;
mod note;
mod order;
mod settlement;

pub use credit::CreditLedger;
pub use note::NoteLedger;
pub use order::OrderLedger;
pub use settlement::SettlementLedger;

use suvidha_store::LedgerSnapshot;

/// All ledger state, as one value.
///
/// Loaded from a [`LedgerSnapshot`] at startup; the orchestrator holds it
/// behind one async mutex (single logical writer).
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    pub orders: OrderLedger,
    pub credits: CreditLedger,
    pub settlements: SettlementLedger,
    pub notes: NoteLedger,
}

impl LedgerState {
    /// Builds ledger state from a persisted snapshot.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        LedgerState {
            orders: OrderLedger::from_map(snapshot.orders),
            credits: CreditLedger::from_records(snapshot.credit_records),
            settlements: SettlementLedger::from_transactions(snapshot.settled_transactions),
            notes: NoteLedger::from_notes(snapshot.notes),
        }
    }
}

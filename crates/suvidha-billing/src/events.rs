//! # Change Events
//!
//! The explicit subscribe/notify seam replacing framework-managed
//! observable state. The orchestrator broadcasts one event per committed
//! mutation; the UI (or a test harness) subscribes and re-reads whatever
//! it renders from that ledger. Events carry no payload: subscribers
//! always re-read committed state, so they can never observe a value the
//! store did not accept.

use serde::Serialize;

/// Which ledger changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// An open cart was created, mutated, cleared, settled, or deferred.
    OrdersChanged,
    /// A credit record was created, reconciled, settled, or annotated.
    CreditsChanged,
    /// A transaction was added to the settlement history.
    SettlementsChanged,
    /// A note was added, edited, or deleted.
    NotesChanged,
}

/// Buffered events per subscriber before the oldest are dropped.
///
/// Subscribers that lag past this re-read all ledgers on the resulting
/// `RecvError::Lagged`, which is always safe because events carry no data.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

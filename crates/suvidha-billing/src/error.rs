//! # Billing Error Type
//!
//! The combined error surface of the orchestrator: a billing rule
//! violation (correctable operator input) or a persistence failure
//! (transient, retry manually). Reconciling or settling a credit record
//! that no longer exists is NOT an error anywhere in this crate - it is
//! an expected race (e.g. a double click) and handled as a silent no-op.

use thiserror::Error;

use suvidha_core::error::CoreError;
use suvidha_core::export::ExportError;
use suvidha_store::StoreError;

/// Errors surfaced by the billing orchestrator.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Billing rule violation: empty bill, missing customer name, bad
    /// input. The UI shows the message inline; no retry needed since it's
    /// a correctable input error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure. The in-memory ledgers are left unchanged; the
    /// UI shows a transient notification and the operator may retry.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Report export rendering failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl BillingError {
    /// True for correctable operator input errors (inline message),
    /// false for transient system failures (toast + manual retry).
    pub fn is_validation(&self) -> bool {
        matches!(self, BillingError::Core(_))
    }
}

/// Result type for orchestrator operations.
pub type BillingResult<T> = Result<T, BillingError>;

//! # Collection Store
//!
//! The persistence boundary the billing orchestrator writes through.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Collection Blob Store                                  │
//! │                                                                         │
//! │  collections table                                                     │
//! │  ┌──────────────────────┬──────────────────────────────┬────────────┐  │
//! │  │ name                 │ payload (JSON)               │ updated_at │  │
//! │  ├──────────────────────┼──────────────────────────────┼────────────┤  │
//! │  │ orders               │ {"1": {"items": [...]}}      │ ...        │  │
//! │  │ credit_records       │ [{...}, {...}]               │ ...        │  │
//! │  │ settled_transactions │ [{...}]                      │ ...        │  │
//! │  │ notes                │ [{...}]                      │ ...        │  │
//! │  └──────────────────────┴──────────────────────────────┴────────────┘  │
//! │                                                                         │
//! │  • load_all: one read at startup                                       │
//! │  • save_collection: one upsert per changed ledger                      │
//! │  • atomic_write: several upserts in ONE transaction, so settle /       │
//! │    defer / reconcile can never persist half of their effect            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each ledger is small for a single restaurant, so whole-collection JSON
//! payloads keep the store trivially portable between backends; the trait
//! is what the orchestrator depends on, and tests substitute
//! [`crate::memory::MemoryStore`].

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use suvidha_core::types::{CreditRecord, Note, SettledTransaction};
use suvidha_core::Order;

use crate::error::StoreResult;
use crate::pool::Store;

// =============================================================================
// Collections
// =============================================================================

/// The named collections the billing ledgers persist into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Open carts keyed by table id.
    Orders,
    /// Udhari records, active and settled.
    CreditRecords,
    /// Finalized payment history.
    SettledTransactions,
    /// Operator scratchpad notes.
    Notes,
}

impl Collection {
    /// All collections, in load order.
    pub const ALL: [Collection; 4] = [
        Collection::Orders,
        Collection::CreditRecords,
        Collection::SettledTransactions,
        Collection::Notes,
    ];

    /// The stored collection name.
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Orders => "orders",
            Collection::CreditRecords => "credit_records",
            Collection::SettledTransactions => "settled_transactions",
            Collection::Notes => "notes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Snapshot and Writes
// =============================================================================

/// Everything the store holds, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Open carts keyed by table id (sparse: only non-empty carts).
    pub orders: BTreeMap<String, Order>,
    /// All credit records, active and settled.
    pub credit_records: Vec<CreditRecord>,
    /// All settled transactions.
    pub settled_transactions: Vec<SettledTransaction>,
    /// All notes.
    pub notes: Vec<Note>,
}

/// One collection replacement, ready to persist.
#[derive(Debug, Clone)]
pub struct CollectionWrite {
    /// Which collection to replace.
    pub collection: Collection,
    /// The full new payload.
    pub payload: serde_json::Value,
}

impl CollectionWrite {
    /// Serializes a value into a pending collection write.
    pub fn new<T: Serialize>(collection: Collection, value: &T) -> StoreResult<Self> {
        Ok(CollectionWrite {
            collection,
            payload: serde_json::to_value(value)?,
        })
    }
}

// =============================================================================
// The Store Trait
// =============================================================================

/// The persistence seam between the orchestrator and any backend.
///
/// ## Contract
/// - `save_collection` and `atomic_write` replace whole collections;
///   partial application is forbidden (a failed `atomic_write` must leave
///   every collection untouched)
/// - Implementations are `Send + Sync` so the orchestrator can hold them
///   behind `Arc<dyn CollectionStore>`
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Loads all collections. Missing collections load as empty.
    async fn load_all(&self) -> StoreResult<LedgerSnapshot>;

    /// Persists one collection (the save-on-change path for cart edits).
    async fn save_collection(&self, write: CollectionWrite) -> StoreResult<()>;

    /// Persists several collections in one transaction. Used by settle,
    /// defer, and reconcile, whose effects span two ledgers.
    async fn atomic_write(&self, writes: Vec<CollectionWrite>) -> StoreResult<()>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

const UPSERT_SQL: &str = "INSERT INTO collections (name, payload, updated_at) \
     VALUES (?1, ?2, ?3) \
     ON CONFLICT(name) DO UPDATE SET \
     payload = excluded.payload, updated_at = excluded.updated_at";

#[async_trait]
impl CollectionStore for Store {
    async fn load_all(&self) -> StoreResult<LedgerSnapshot> {
        let rows = sqlx::query("SELECT name, payload FROM collections")
            .fetch_all(self.pool())
            .await?;

        let mut snapshot = LedgerSnapshot::default();
        for row in rows {
            let name: String = row.try_get("name")?;
            let payload: String = row.try_get("payload")?;
            match name.as_str() {
                "orders" => snapshot.orders = serde_json::from_str(&payload)?,
                "credit_records" => snapshot.credit_records = serde_json::from_str(&payload)?,
                "settled_transactions" => {
                    snapshot.settled_transactions = serde_json::from_str(&payload)?
                }
                "notes" => snapshot.notes = serde_json::from_str(&payload)?,
                other => warn!(collection = %other, "Ignoring unknown collection"),
            }
        }

        debug!(
            orders = snapshot.orders.len(),
            credits = snapshot.credit_records.len(),
            settled = snapshot.settled_transactions.len(),
            notes = snapshot.notes.len(),
            "Loaded collections"
        );
        Ok(snapshot)
    }

    async fn save_collection(&self, write: CollectionWrite) -> StoreResult<()> {
        debug!(collection = %write.collection, "Saving collection");

        sqlx::query(UPSERT_SQL)
            .bind(write.collection.name())
            .bind(write.payload.to_string())
            .bind(Utc::now().to_rfc3339())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn atomic_write(&self, writes: Vec<CollectionWrite>) -> StoreResult<()> {
        debug!(count = writes.len(), "Applying atomic collection write");

        let mut tx = self.pool().begin().await?;
        let now = Utc::now().to_rfc3339();

        for write in &writes {
            sqlx::query(UPSERT_SQL)
                .bind(write.collection.name())
                .bind(write.payload.to_string())
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # In-Memory Store
//!
//! A `CollectionStore` fake backed by a map. Used by orchestrator tests
//! (and any harness that wants billing logic without a database file); the
//! design requires all three ledgers to be constructible and injectable,
//! and this is the injectable substitute.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::collections::{CollectionStore, CollectionWrite, LedgerSnapshot};
use crate::error::StoreResult;

/// In-memory collection store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of one raw collection payload, for assertions.
    pub async fn raw_collection(&self, name: &str) -> Option<serde_json::Value> {
        self.inner.lock().await.get(name).cloned()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load_all(&self) -> StoreResult<LedgerSnapshot> {
        let inner = self.inner.lock().await;
        let mut snapshot = LedgerSnapshot::default();

        if let Some(v) = inner.get("orders") {
            snapshot.orders = serde_json::from_value(v.clone())?;
        }
        if let Some(v) = inner.get("credit_records") {
            snapshot.credit_records = serde_json::from_value(v.clone())?;
        }
        if let Some(v) = inner.get("settled_transactions") {
            snapshot.settled_transactions = serde_json::from_value(v.clone())?;
        }
        if let Some(v) = inner.get("notes") {
            snapshot.notes = serde_json::from_value(v.clone())?;
        }

        Ok(snapshot)
    }

    async fn save_collection(&self, write: CollectionWrite) -> StoreResult<()> {
        self.inner
            .lock()
            .await
            .insert(write.collection.name().to_string(), write.payload);
        Ok(())
    }

    async fn atomic_write(&self, writes: Vec<CollectionWrite>) -> StoreResult<()> {
        // One lock held across all inserts: all-or-nothing by construction.
        let mut inner = self.inner.lock().await;
        for write in writes {
            inner.insert(write.collection.name().to_string(), write.payload);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::Collection;
    use chrono::Utc;
    use suvidha_core::types::Note;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let notes = vec![Note {
            id: "n1".to_string(),
            content: "call dairy".to_string(),
            created_at: Utc::now(),
        }];

        store
            .save_collection(CollectionWrite::new(Collection::Notes, &notes).unwrap())
            .await
            .unwrap();

        let snapshot = store.load_all().await.unwrap();
        assert_eq!(snapshot.notes, notes);
        assert!(store.raw_collection("notes").await.is_some());
        assert!(store.raw_collection("orders").await.is_none());
    }
}

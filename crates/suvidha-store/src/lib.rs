//! # suvidha-store: Persistence Layer for Suvidha POS
//!
//! This crate provides persistence for the billing ledgers. Each ledger is
//! stored as one named JSON collection in a SQLite key-value table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Suvidha POS Data Flow                             │
//! │                                                                         │
//! │  BillingOrchestrator (settle / defer / reconcile)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   suvidha-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │     Store     │    │CollectionStore │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │    (trait)     │    │  (embedded)  │ │   │
//! │  │   │               │    │                │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│ load_all       │    │ 001_collec-  │ │   │
//! │  │   │ WAL mode      │    │ save_collection│    │ tions.sql    │ │   │
//! │  │   │               │    │ atomic_write   │    │              │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  collections table: one row per ledger, JSON payload                   │
//! │    orders | credit_records | settled_transactions | notes              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`collections`] - The `CollectionStore` trait and the SQLite impl
//! - [`memory`] - In-memory fake for tests
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use suvidha_store::{CollectionStore, Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("./suvidha.db")).await?;
//! let snapshot = store.load_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collections;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use collections::{Collection, CollectionStore, CollectionWrite, LedgerSnapshot};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{Store, StoreConfig};

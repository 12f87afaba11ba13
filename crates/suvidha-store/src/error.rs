//! # Persistence Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) / serde_json::Error                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BillingError::Store ← In-memory ledgers stay unchanged; the UI        │
//! │       │                 surfaces a transient notification              │
//! │       ▼                                                                 │
//! │  Operator may retry the triggering action manually                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence failures.
///
/// A store error never leaves partially-written state: single-collection
/// saves are one statement, and multi-collection writes run inside one
/// SQLite transaction that rolls back on failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed (a multi-collection write rolled back).
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A collection payload could not be serialized or parsed.
    ///
    /// ## When This Occurs
    /// - The stored JSON is corrupt or from an incompatible version
    #[error("Collection payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::ConnectionFailed("disk full".to_string());
        assert_eq!(err.to_string(), "Connection failed: disk full");

        assert_eq!(StoreError::PoolExhausted.to_string(), "Connection pool exhausted");
    }

    #[test]
    fn test_sqlx_error_mapping() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::PoolExhausted));
    }
}

//! Error types for the storage accessor.
//!
//! Only hard failures live here. "Not found" and "already exists" are
//! reported through the `error` field of the returned record instead.

/// Errors raised while talking to the relational store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The connection (or pool) could not be established.
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// Creating the `todo` table failed.
    #[error("failed to prepare schema: {0}")]
    Schema(#[source] sqlx::Error),

    /// A statement failed to execute.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

//! Storage accessor for the `todo` table.
//!
//! Every statement binds its values as parameters. Writes that used to be a
//! check followed by a separate write are single statements (or one
//! transaction), so concurrent requests on the same id cannot interleave
//! between the check and the write.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::ServerConfig;
use crate::error::StorageError;
use crate::todo::TodoRow;

pub const MEMORY_URL: &str = "sqlite::memory:";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY NOT NULL,
    description TEXT NOT NULL,
    isFinished BOOLEAN NOT NULL DEFAULT 0
)";

const SELECT_ALL: &str = "SELECT id, description, isFinished FROM todo";

const SELECT_BY_ID: &str = "SELECT id, description, isFinished FROM todo WHERE id = ? LIMIT 1";

const INSERT_NEW: &str = "INSERT INTO todo (id, description) VALUES (?, ?)
    ON CONFLICT(id) DO NOTHING
    RETURNING id, description, isFinished";

const UPDATE_BY_ID: &str = "UPDATE todo SET description = ?, isFinished = ? WHERE id = ?
    RETURNING id, description, isFinished";

const DELETE_BY_ID: &str = "DELETE FROM todo WHERE id = ?";

/// Result of [`Storage::insert_or_existing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written; this is its stored state.
    Inserted(TodoRow),
    /// The id was taken; this is the row that already held it.
    Existed(TodoRow),
}

/// Handle to the relational store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Opens a connection pool for `config.database_url`.
    ///
    /// Database files are created when missing. Safe to call more than once;
    /// each call yields an independent pool.
    pub async fn connect(config: &ServerConfig) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|source| connect_error(config, source))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.database_url.contains(":memory:") {
            // Each new connection to an in-memory database starts empty.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|source| connect_error(config, source))?;
        tracing::info!(url = %config.database_url, "connected to storage");
        Ok(Self { pool })
    }

    /// Opens a fresh in-memory database with the `todo` table in place.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let config = ServerConfig {
            database_url: MEMORY_URL.to_string(),
            max_connections: 1,
            ..ServerConfig::default()
        };
        let storage = Self::connect(&config).await?;
        storage.ensure_schema().await?;
        Ok(storage)
    }

    /// Creates the `todo` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Schema)?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Every row, in whatever order the engine yields them.
    pub async fn all(&self) -> Result<Vec<TodoRow>, StorageError> {
        let rows = sqlx::query_as::<_, TodoRow>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i32) -> Result<Option<TodoRow>, StorageError> {
        let row = sqlx::query_as::<_, TodoRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts `(id, description)` unless `id` is taken, in one transaction.
    ///
    /// `isFinished` takes the column default on insert.
    pub async fn insert_or_existing(
        &self,
        id: i32,
        description: &str,
    ) -> Result<InsertOutcome, StorageError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, TodoRow>(INSERT_NEW)
            .bind(id)
            .bind(description)
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = match inserted {
            Some(row) => InsertOutcome::Inserted(row),
            None => {
                let existing = sqlx::query_as::<_, TodoRow>(SELECT_BY_ID)
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
                InsertOutcome::Existed(existing)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Overwrites description and `isFinished` of row `id`.
    ///
    /// Returns the refreshed row, or `None` when no row matched.
    pub async fn update(
        &self,
        id: i32,
        description: &str,
        is_finished: bool,
    ) -> Result<Option<TodoRow>, StorageError> {
        let row = sqlx::query_as::<_, TodoRow>(UPDATE_BY_ID)
            .bind(description)
            .bind(is_finished)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Removes row `id`. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn connect_error(config: &ServerConfig, source: sqlx::Error) -> StorageError {
    StorageError::Connect {
        url: config.database_url.clone(),
        source,
    }
}

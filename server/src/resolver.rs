//! Resolver layer: the five todo operations on top of [`Storage`].
//!
//! Each call round-trips to storage; nothing is cached. "Not found" and
//! "already exists" come back as records carrying `error`, while storage
//! failures propagate as `Err`.

use crate::error::StorageError;
use crate::storage::{InsertOutcome, Storage};
use crate::todo::{existed_message, not_found_message, Todo};

#[derive(Debug, Clone)]
pub struct TodoService {
    storage: Storage,
}

impl TodoService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Lists every todo. Order is whatever storage yields.
    #[tracing::instrument(skip(self))]
    pub async fn todos(&self) -> Result<Vec<Todo>, StorageError> {
        let rows = self.storage.all().await?;
        tracing::debug!(count = rows.len(), "listed todos");
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    /// Looks up a single todo.
    ///
    /// A missing id yields a record whose data fields are all null and whose
    /// `error` reads `Todo with Id = {id} not found!`.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Todo, StorageError> {
        match self.storage.find(id).await? {
            Some(row) => Ok(Todo::from(row)),
            None => {
                tracing::warn!(id, "todo not found");
                Ok(Todo::missing(not_found_message(id)))
            }
        }
    }

    /// Creates a todo with a caller-chosen id.
    ///
    /// When the id is already taken nothing is written; the existing row is
    /// returned with `error` set to `Todo with Id = {id} existed!`.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, id: i32, description: &str) -> Result<Todo, StorageError> {
        match self.storage.insert_or_existing(id, description).await? {
            InsertOutcome::Inserted(row) => {
                tracing::info!(id, "todo created");
                Ok(Todo::from(row))
            }
            InsertOutcome::Existed(row) => {
                tracing::warn!(id, "todo already exists");
                Ok(Todo::from(row).with_error(existed_message(id)))
            }
        }
    }

    /// Overwrites description and `isFinished` of an existing todo and
    /// returns the refreshed row.
    #[tracing::instrument(skip(self))]
    pub async fn edit(
        &self,
        id: i32,
        description: &str,
        is_finished: bool,
    ) -> Result<Todo, StorageError> {
        match self.storage.update(id, description, is_finished).await? {
            Some(row) => {
                tracing::info!(id, "todo updated");
                Ok(Todo::from(row))
            }
            None => {
                tracing::warn!(id, "update matched no row");
                Ok(Todo::missing(not_found_message(id)))
            }
        }
    }

    /// Deletes a todo. Returns `true` only when a row was removed.
    ///
    /// A missing or zero id is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Option<i32>) -> Result<bool, StorageError> {
        let Some(id) = id.filter(|id| *id != 0) else {
            tracing::debug!("delete without id ignored");
            return Ok(false);
        };
        let deleted = self.storage.delete(id).await?;
        if deleted {
            tracing::info!(id, "todo deleted");
        }
        Ok(deleted)
    }
}

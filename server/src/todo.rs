//! The `Todo` entity: the persisted row and the response record built from it.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A row of the `todo` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoRow {
    pub id: i32,
    pub description: String,
    #[sqlx(rename = "isFinished")]
    pub is_finished: bool,
}

/// A todo as returned to API callers.
///
/// Every field is nullable: when an operation cannot find the requested
/// row the record carries only `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Option<i32>,
    pub description: Option<String>,
    pub is_finished: Option<bool>,
    /// Human-readable reason the request could not be completed as asked.
    /// Never persisted.
    pub error: Option<String>,
}

impl Todo {
    /// A record with no data fields, only the given error.
    pub fn missing(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: Some(row.id),
            description: Some(row.description),
            is_finished: Some(row.is_finished),
            error: None,
        }
    }
}

pub fn not_found_message(id: i32) -> String {
    format!("Todo with Id = {id} not found!")
}

pub fn existed_message(id: i32) -> String {
    format!("Todo with Id = {id} existed!")
}

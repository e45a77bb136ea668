//! DTOs for the todo GraphQL API.
//!
//! These mirror the server's schema but are defined independently;
//! the end-to-end test catches drift between the two crates.

use serde::{Deserialize, Serialize};

/// A todo as returned by the API. Every field is nullable: a record for an
/// id that could not be found carries only `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Option<i32>,
    pub description: Option<String>,
    pub is_finished: Option<bool>,
    pub error: Option<String>,
}

/// Variables for the `create` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub id: i32,
    pub description: String,
}

/// Variables for the `edit` mutation. Both fields are overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditTodo {
    pub id: i32,
    pub description: String,
    pub is_finished: bool,
}

/// Body of a GraphQL-over-HTTP request.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Envelope of a GraphQL-over-HTTP response before `data` is typed.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

//! Stateless GraphQL request builder and response parser for the todo API.
//!
//! `TodoClient` holds only the endpoint URL. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, EditTodo, GraphQlRequest, GraphQlResponse, Todo};

pub const LIST_TODOS: &str =
    "query Todos { todos { id description isFinished error } }";

pub const GET_BY_ID: &str =
    "query GetById($id: Int!) { getById(id: $id) { id description isFinished error } }";

pub const CREATE_TODO: &str = "mutation Create($id: Int!, $description: String!) { \
     create(id: $id, description: $description) { id description isFinished error } }";

pub const EDIT_TODO: &str =
    "mutation Edit($id: Int!, $description: String!, $isFinished: Boolean!) { \
     edit(id: $id, description: $description, isFinished: $isFinished) { \
     id description isFinished error } }";

pub const DELETE_TODO: &str = "mutation Delete($id: Int) { delete(id: $id) }";

#[derive(Deserialize)]
struct TodosData {
    todos: Vec<Todo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetByIdData {
    get_by_id: Todo,
}

#[derive(Deserialize)]
struct CreateData {
    create: Todo,
}

#[derive(Deserialize)]
struct EditData {
    edit: Todo,
}

#[derive(Deserialize)]
struct DeleteData {
    delete: bool,
}

/// Synchronous, stateless client for the todo GraphQL API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    endpoint: String,
}

impl TodoClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string() + "/",
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_list_todos(&self) -> Result<HttpRequest, ApiError> {
        self.build(LIST_TODOS, json!({}))
    }

    pub fn build_get_by_id(&self, id: i32) -> Result<HttpRequest, ApiError> {
        self.build(GET_BY_ID, json!({ "id": id }))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.build(CREATE_TODO, input)
    }

    pub fn build_edit_todo(&self, input: &EditTodo) -> Result<HttpRequest, ApiError> {
        self.build(EDIT_TODO, input)
    }

    /// `None` is sent as a null id, which the server treats as a no-op.
    pub fn build_delete_todo(&self, id: Option<i32>) -> Result<HttpRequest, ApiError> {
        self.build(DELETE_TODO, json!({ "id": id }))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_data::<TodosData>(response).map(|data| data.todos)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data::<GetByIdData>(response).map(|data| data.get_by_id)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data::<CreateData>(response).map(|data| data.create)
    }

    pub fn parse_edit_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_data::<EditData>(response).map(|data| data.edit)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_data::<DeleteData>(response).map(|data| data.delete)
    }

    fn build<V: Serialize>(&self, query: &str, variables: V) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&GraphQlRequest { query, variables })
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }
}

/// Checks the status, surfaces GraphQL `errors`, then types `data`.
fn parse_data<D: DeserializeOwned>(response: HttpResponse) -> Result<D, ApiError> {
    check_status(&response)?;
    let envelope: GraphQlResponse = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if !envelope.errors.is_empty() {
        return Err(ApiError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    let data = envelope.data.ok_or(ApiError::MissingData)?;
    serde_json::from_value(data).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:4000")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn body_of(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(&req.body).unwrap()
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos().unwrap();
        assert_eq!(req.url, "http://localhost:4000/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body = body_of(&req);
        assert_eq!(body["query"], LIST_TODOS);
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn build_create_todo_sends_variables() {
        let input = CreateTodo {
            id: 1,
            description: "Buy milk".to_string(),
        };
        let body = body_of(&client().build_create_todo(&input).unwrap());
        assert_eq!(body["query"], CREATE_TODO);
        assert_eq!(body["variables"], json!({ "id": 1, "description": "Buy milk" }));
    }

    #[test]
    fn build_edit_todo_uses_camel_case_variables() {
        let input = EditTodo {
            id: 2,
            description: "Walk dog".to_string(),
            is_finished: true,
        };
        let body = body_of(&client().build_edit_todo(&input).unwrap());
        assert_eq!(
            body["variables"],
            json!({ "id": 2, "description": "Walk dog", "isFinished": true })
        );
    }

    #[test]
    fn build_delete_todo_without_id_sends_null() {
        let body = body_of(&client().build_delete_todo(None).unwrap());
        assert_eq!(body["query"], DELETE_TODO);
        assert_eq!(body["variables"], json!({ "id": null }));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let a = TodoClient::new("http://localhost:4000/");
        let b = TodoClient::new("http://localhost:4000");
        assert_eq!(a.endpoint(), b.endpoint());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(ok(concat!(
                r#"{"data":{"todos":["#,
                r#"{"id":1,"description":"Test","isFinished":false,"error":null}"#,
                r#"]}}"#,
            )))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].description.as_deref(), Some("Test"));
        assert_eq!(todos[0].is_finished, Some(false));
    }

    #[test]
    fn parse_get_by_id_keeps_soft_error() {
        let todo = client()
            .parse_get_by_id(ok(concat!(
                r#"{"data":{"getById":{"id":null,"description":null,"isFinished":null,"#,
                r#""error":"Todo with Id = 3 not found!"}}}"#,
            )))
            .unwrap();
        assert!(todo.id.is_none());
        assert_eq!(todo.error.as_deref(), Some("Todo with Id = 3 not found!"));
    }

    #[test]
    fn parse_create_todo_existed() {
        let todo = client()
            .parse_create_todo(ok(concat!(
                r#"{"data":{"create":{"id":1,"description":"old","isFinished":true,"#,
                r#""error":"Todo with Id = 1 existed!"}}}"#,
            )))
            .unwrap();
        assert_eq!(todo.description.as_deref(), Some("old"));
        assert!(todo.error.is_some());
    }

    #[test]
    fn parse_delete_todo_returns_flag() {
        assert!(client().parse_delete_todo(ok(r#"{"data":{"delete":true}}"#)).unwrap());
        assert!(!client().parse_delete_todo(ok(r#"{"data":{"delete":false}}"#)).unwrap());
    }

    #[test]
    fn graphql_errors_are_hard_failures() {
        let err = client()
            .parse_list_todos(ok(
                r#"{"data":null,"errors":[{"message":"database error: no such table: todo"}]}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::GraphQl(messages) => {
                assert_eq!(messages, vec!["database error: no such table: todo".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn partial_data_with_errors_is_still_an_error() {
        let err = client()
            .parse_edit_todo(ok(r#"{"data":{"edit":null},"errors":[{"message":"boom"}]}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::GraphQl(_)));
    }

    #[test]
    fn missing_data_is_reported() {
        let err = client().parse_list_todos(ok(r#"{}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }

    #[test]
    fn wrong_status_is_http_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn bad_json_is_deserialization_error() {
        let err = client().parse_list_todos(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}

//! Synchronous client core for the todo GraphQL API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that, `TodoApp`
//! keeps the page state: the fetched list, the create/update form and the
//! messages shown next to it.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the endpoint.
//! - Every operation is a `build_*` / `parse_*` pair, so the I/O boundary is
//!   explicit.
//! - `TodoApp` drives a host-supplied `Transport` and re-fetches the full
//!   list after every mutation.
//! - Soft errors (`Todo::error`) are data; only hard failures are `ApiError`.

pub mod app;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod types;

pub use app::{FormMode, FormState, SubmitOutcome, TodoApp};
pub use client::TodoClient;
pub use error::ApiError;
pub use form::{validate, Field, FieldError, FieldErrorKind, FormValues, ValidTodo};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use types::{CreateTodo, EditTodo, Todo};

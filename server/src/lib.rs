//! GraphQL todo server backed by a single SQLite table.
//!
//! # Overview
//! - [`storage`] opens the database and runs bound-parameter statements
//!   against the `todo` table.
//! - [`resolver`] implements list / get / create / edit / delete on top of
//!   it, reporting "not found" and "already exists" through `Todo::error`.
//! - [`schema`] exposes the resolvers as a GraphQL schema; [`app`] serves it
//!   over HTTP.

pub mod config;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod storage;
pub mod todo;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::StorageError;
pub use resolver::TodoService;
pub use schema::{build_schema, TodoSchema};
pub use storage::Storage;
pub use todo::Todo;

/// `POST /` executes GraphQL requests, `GET /` serves GraphiQL.
pub fn app(schema: TodoSchema) -> Router {
    Router::new()
        .route("/", get(graphiql).post_service(GraphQL::new(schema)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(listener: TcpListener, schema: TodoSchema) -> Result<(), std::io::Error> {
    axum::serve(listener, app(schema)).await
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

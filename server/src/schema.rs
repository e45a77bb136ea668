//! GraphQL schema exposing the todo resolvers.
//!
//! ```graphql
//! type Query {
//!   todos: [Todo!]!
//!   getById(id: Int!): Todo!
//! }
//! type Mutation {
//!   create(id: Int!, description: String!): Todo!
//!   edit(id: Int!, description: String!, isFinished: Boolean!): Todo!
//!   delete(id: Int): Boolean!
//! }
//! ```

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};

use crate::resolver::TodoService;
use crate::storage::Storage;
use crate::todo::Todo;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with a [`TodoService`] over `storage` as shared data.
pub fn build_schema(storage: Storage) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(TodoService::new(storage))
        .finish()
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a TodoService> {
    ctx.data::<TodoService>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every todo in the table.
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<Todo>> {
        Ok(service(ctx)?.todos().await?)
    }

    /// A single todo; `error` is set when the id does not exist.
    async fn get_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Todo> {
        Ok(service(ctx)?.get_by_id(id).await?)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates a todo; `error` is set when the id is already taken.
    async fn create(&self, ctx: &Context<'_>, id: i32, description: String) -> Result<Todo> {
        Ok(service(ctx)?.create(id, &description).await?)
    }

    /// Overwrites a todo; `error` is set when the id does not exist.
    async fn edit(
        &self,
        ctx: &Context<'_>,
        id: i32,
        description: String,
        is_finished: bool,
    ) -> Result<Todo> {
        Ok(service(ctx)?.edit(id, &description, is_finished).await?)
    }

    /// Deletes a todo; `false` when nothing was removed.
    async fn delete(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<bool> {
        Ok(service(ctx)?.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::{Request, Variables};
    use serde_json::json;

    use super::*;

    async fn schema() -> TodoSchema {
        build_schema(Storage::in_memory().await.unwrap())
    }

    async fn execute(
        schema: &TodoSchema,
        query: &str,
        variables: serde_json::Value,
    ) -> serde_json::Value {
        let response = schema
            .execute(Request::new(query).variables(Variables::from_json(variables)))
            .await;
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn field_and_argument_names_are_camel_case() {
        let schema = schema().await;
        execute(
            &schema,
            "mutation($id: Int!) { create(id: $id, description: \"a\") { id } }",
            json!({ "id": 1 }),
        )
        .await;

        let data = execute(
            &schema,
            "mutation { edit(id: 1, description: \"b\", isFinished: true) { \
             id description isFinished error } }",
            json!({}),
        )
        .await;
        assert_eq!(
            data["edit"],
            json!({ "id": 1, "description": "b", "isFinished": true, "error": null })
        );

        let data = execute(&schema, "{ getById(id: 1) { isFinished } }", json!({})).await;
        assert_eq!(data["getById"]["isFinished"], true);
    }

    #[tokio::test]
    async fn delete_accepts_null_id() {
        let schema = schema().await;
        let data = execute(&schema, "mutation { delete(id: null) }", json!({})).await;
        assert_eq!(data["delete"], false);

        let data = execute(&schema, "mutation { delete }", json!({})).await;
        assert_eq!(data["delete"], false);
    }

    #[tokio::test]
    async fn missing_service_is_a_hard_error() {
        let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish();
        let response = schema.execute("{ todos { id } }").await;
        assert_eq!(response.errors.len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_graphql_error() {
        let storage = Storage::in_memory().await.unwrap();
        sqlx::query("DROP TABLE todo")
            .execute(storage.pool())
            .await
            .unwrap();
        let schema = build_schema(storage);

        let response = schema.execute("{ todos { id } }").await;
        assert!(!response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), serde_json::Value::Null);

        let response = schema
            .execute("mutation { create(id: 1, description: \"a\") { id error } }")
            .await;
        assert!(!response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), serde_json::Value::Null);

        let response = schema
            .execute("mutation { edit(id: 1, description: \"a\", isFinished: true) { id } }")
            .await;
        assert!(!response.errors.is_empty());
    }
}

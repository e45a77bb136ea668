//! Error types for the todo API client.
//!
//! These are hard failures only. A todo that could not be found or created
//! comes back as a normal response whose `error` field is set.

/// Errors returned by `TodoClient` and `TodoApp`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The server rejected or failed the operation at the GraphQL level.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response had neither `errors` nor `data`.
    #[error("response carried no data")]
    MissingData,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

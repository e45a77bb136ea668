//! HTTP transport types for the host-does-IO pattern.
//!
//! The core builds [`HttpRequest`] values and parses [`HttpResponse`] values
//! without touching the network. The host executes the round-trip, either
//! by hand between `build_*` and `parse_*` or by handing a [`Transport`] to
//! [`crate::TodoApp`].

use crate::error::ApiError;

/// A GraphQL-over-HTTP request described as plain data. Always a `POST`
/// with a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes requests on behalf of the core.
///
/// Implementations must return non-2xx responses as data rather than as
/// `Err`; `Err` is reserved for failures to reach the server at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

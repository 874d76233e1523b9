//! HTTP transport types for outbound calls.
//!
//! # Design
//! Requests and responses are plain data. The classifier client builds an
//! `HttpRequest` and parses an `HttpResponse` without touching the network;
//! a `Transport` executes the round-trip in between. Swapping the transport
//! swaps the simulated service for a real one without changing the wire
//! format code.

use async_trait::async_trait;

use crate::error::ClassifierError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A `200` response with a JSON body.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.into(),
        }
    }
}

/// Executes an `HttpRequest` and returns the response as data.
///
/// Connection-level failures map to `ClassifierError::ServiceUnavailable`.
/// Non-2xx statuses are returned as responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClassifierError>;
}

//! Transport abstraction layer for A2A protocol

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::{
    collections::HashMap,
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde_json::Value;
use url::Url;

pub use http::HttpTransport;

use crate::protocol::error::A2AError;

/// Raw response body chunks of a streaming request
pub type ByteStream = BoxStream<'static, Result<Bytes, A2AError>>;

/// Protocol-agnostic transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The endpoint path relative to the target (e.g. "/.well-known/agent-card.json")
    pub endpoint: String,

    /// HTTP method or equivalent operation (e.g., "POST", "GET")
    pub method: String,

    /// Headers or metadata for the request
    pub headers: HashMap<String, String>,

    /// Request body as bytes
    pub body: Bytes,

    /// Absolute URL to send to instead of the transport's base URL
    pub target: Option<Url>,

    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Create a new transport request
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
            target: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Send to `target` instead of the transport's base URL
    pub fn target(mut self, target: Url) -> Self {
        self.target = Some(target);
        self
    }

    /// Bound the request by `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Protocol-agnostic transport response
#[derive(Debug)]
pub struct TransportResponse {
    /// Status code (e.g., HTTP status code)
    pub status: u16,

    /// Response headers or metadata
    pub headers: HashMap<String, String>,

    /// Response body as bytes
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the response
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the response body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the error for a non-success status
///
/// The message is taken from a JSON `message` or `error` field when the body
/// carries one, otherwise from the body text.
pub(crate) fn error_for_status(status: u16, body: &[u8]) -> A2AError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    A2AError::HttpStatus { status, message }
}

/// Core transport trait for executing protocol-agnostic requests
///
/// This trait abstracts over the network so the A2A protocol layer can be
/// driven by HTTP in production and by in-memory handlers in tests.
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Check if the transport is ready to accept requests
    ///
    /// This is used by Tower's Service trait to implement backpressure
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), A2AError>>;

    /// Execute a transport request and buffer the whole response
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError>;

    /// Execute a transport request and hand back the body as it arrives
    ///
    /// Non-success statuses are reported as errors before any chunk is read.
    async fn execute_streaming(&self, request: TransportRequest) -> Result<ByteStream, A2AError> {
        let _ = request;
        Err(A2AError::Transport(
            "Streaming is not supported by this transport".to_string(),
        ))
    }

    /// Get the base URL for this transport
    ///
    /// For agent runtimes this is the invocation URL the agent card is
    /// resolved against.
    fn base_url(&self) -> &Url;

    /// Check if this transport supports streaming responses
    fn supports_streaming(&self) -> bool {
        false
    }
}

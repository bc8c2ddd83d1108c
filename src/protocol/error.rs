//! Error types for A2A protocol operations

use thiserror::Error;

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level error (malformed envelope, unexpected response, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or response)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// The agent runtime answered with a non-success HTTP status
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16, message: String },

    /// The agent answered with a JSON-RPC error object
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    /// The response stream ended without yielding a single event
    #[error("No response from agent")]
    NoResponse,

    /// Missing or invalid configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration problems that prevent a call from being attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bearer token is not configured")]
    MissingToken,

    #[error("agent runtime URL is not configured")]
    MissingUrl,

    #[error("agent runtime ARN is not configured")]
    MissingAgentArn,

    #[error("invalid agent runtime URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}

//! JSON-RPC 2.0 codec for A2A protocol
//!
//! This codec wraps A2A operations in JSON-RPC 2.0 envelopes, the binding
//! agent runtimes expose on their invocation URL.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    codec::Codec,
    protocol::{
        agent::AgentCard, error::A2AError, event::AgentEvent, message::Message,
        operation::A2AOperation,
    },
    service::response::A2AResponse,
};

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: MessageSendParams<'a>,
    id: String,
}

#[derive(Debug, Serialize)]
struct MessageSendParams<'a> {
    message: &'a Message,
    configuration: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 codec that wraps A2A operations
///
/// Requests are sent as `message/send` or `message/stream` calls with a
/// fresh time-ordered request id. Card discovery is a plain GET and is not
/// wrapped.
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }

    /// Unwrap the `result` of a JSON-RPC response envelope
    fn unwrap_result(body: &[u8]) -> Result<Value, A2AError> {
        let response: JsonRpcResponse = serde_json::from_slice(body).map_err(|e| {
            A2AError::Protocol(format!("Failed to parse JSON-RPC response: {}", e))
        })?;

        if let Some(error) = response.error {
            return Err(A2AError::JsonRpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| {
            A2AError::Protocol("JSON-RPC response missing 'result' field".to_string())
        })
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError> {
        let (message, method) = match (operation, operation.rpc_method()) {
            (A2AOperation::SendMessage { message, .. }, Some(method)) => (message, method),
            _ => return Ok(Bytes::new()),
        };

        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: MessageSendParams {
                message,
                configuration: json!({ "blocking": true }),
            },
            id: Uuid::now_v7().to_string(),
        };

        let bytes = serde_json::to_vec(&request)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        match operation {
            A2AOperation::DiscoverAgent => {
                if body.is_empty() {
                    return Err(A2AError::Protocol("Empty agent card response".to_string()));
                }
                let card: AgentCard = serde_json::from_slice(body)?;
                Ok(A2AResponse::AgentCard(Box::new(card)))
            }
            A2AOperation::SendMessage { .. } => {
                let result = Self::unwrap_result(body)?;
                Ok(A2AResponse::Event(Box::new(AgentEvent::from_value(result))))
            }
        }
    }

    fn decode_event(&self, data: &str) -> Result<AgentEvent, A2AError> {
        Self::unwrap_result(data.as_bytes()).map(AgentEvent::from_value)
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

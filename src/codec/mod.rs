//! Serialization codecs for A2A protocol bindings

pub mod jsonrpc;
pub mod sse;

pub use jsonrpc::JsonRpcCodec;
pub use sse::SseCodec;

use bytes::Bytes;

use crate::{
    protocol::{error::A2AError, event::AgentEvent, operation::A2AOperation},
    service::response::A2AResponse,
};

/// Codec trait for encoding and decoding A2A protocol messages
///
/// A codec owns the wire envelope of a binding. The JSON-RPC binding is the
/// one agent runtimes speak today.
pub trait Codec: Send + Sync {
    /// Serialize an A2A operation to bytes for transport
    ///
    /// Operations without a request body (such as card discovery) encode to
    /// an empty buffer.
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError>;

    /// Deserialize a complete response body to an A2A response
    ///
    /// # Arguments
    ///
    /// * `body` - The response body bytes
    /// * `operation` - The original operation (for context)
    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError>;

    /// Deserialize the data of one server-sent event
    fn decode_event(&self, data: &str) -> Result<AgentEvent, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}

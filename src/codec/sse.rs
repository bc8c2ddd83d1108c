//! Server-Sent Events (SSE) codec for streaming A2A responses
//!
//! Each SSE `data:` payload is a complete JSON-RPC 2.0 response whose result
//! is one agent event.

use std::sync::Arc;

use eventsource_stream::Eventsource;
use futures::{future, stream::StreamExt};
use tracing::trace;

use crate::{
    codec::Codec, protocol::error::A2AError, service::response::EventStream,
    transport::ByteStream,
};

/// SSE codec for parsing streaming responses
#[derive(Debug, Clone, Default)]
pub struct SseCodec;

impl SseCodec {
    /// Create a new SSE codec
    pub fn new() -> Self {
        Self
    }

    /// Parse an SSE byte stream into a stream of agent events
    ///
    /// Events with an empty data field (keep-alives) are skipped. Each
    /// remaining event is decoded with `codec`.
    pub fn parse_stream(&self, byte_stream: ByteStream, codec: Arc<dyn Codec>) -> EventStream {
        byte_stream
            .eventsource()
            .filter_map(move |result| {
                let item = match result {
                    Ok(event) if event.data.trim().is_empty() => None,
                    Ok(event) => {
                        trace!(event = %event.event, id = %event.id, "received SSE event");
                        Some(codec.decode_event(&event.data))
                    }
                    Err(e) => Some(Err(A2AError::Transport(format!("SSE stream error: {}", e)))),
                };
                future::ready(item)
            })
            .boxed()
    }
}

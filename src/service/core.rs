//! Core A2A protocol service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;
use tracing::debug;

use crate::{
    codec::{Codec, SseCodec},
    protocol::{error::A2AError, operation::A2AOperation},
    service::{A2ARequest, A2AResponse},
    transport::{error_for_status, Transport, TransportRequest, TransportResponse},
};

/// Core A2A protocol service that wraps a transport
///
/// This service implements the Tower `Service` trait and provides the core logic
/// for executing A2A operations over any transport. Blocking sends resolve to
/// a single event, streaming sends to an event stream.
pub struct A2AProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> A2AProtocolService<T>
where
    T: Transport,
{
    /// Create a new A2A protocol service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from an A2A operation
    fn build_transport_request(
        req: &A2ARequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, A2AError> {
        let method = req.operation.method();

        let mut transport_req = TransportRequest::new(req.operation.endpoint(), method)
            .header("Content-Type", codec.content_type())
            .header("Accept", codec.content_type());

        if let Some(auth) = &req.context.auth {
            let (header, value) = auth.to_header();
            transport_req = transport_req.header(header, value);
        }

        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        if let Some(target) = &req.context.agent_url {
            transport_req = transport_req.target(target.clone());
        }

        if let Some(timeout) = req.context.timeout {
            transport_req = transport_req.timeout(timeout);
        }

        let body = codec.encode_request(&req.operation)?;
        if !body.is_empty() && method != "GET" {
            transport_req = transport_req.body(body);
        }

        Ok(transport_req)
    }

    /// Parse a buffered transport response into an A2A response
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        if !transport_resp.is_success() {
            return Err(error_for_status(transport_resp.status, &transport_resp.body));
        }

        codec.decode_response(&transport_resp.body, operation)
    }
}

impl<T> Service<A2ARequest> for A2AProtocolService<T>
where
    T: Transport,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            if req.operation.is_streaming() {
                debug!("opening event stream");
                let bytes = transport.execute_streaming(transport_req).await?;
                return Ok(A2AResponse::Events(SseCodec::new().parse_stream(bytes, codec)));
            }

            let transport_resp = transport.execute(transport_req).await?;
            debug!(status = transport_resp.status, "received response");

            Self::parse_transport_response(transport_resp, codec.as_ref(), &req.operation)
        })
    }
}

impl<T> Clone for A2AProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}

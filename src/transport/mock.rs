use std::{
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use url::Url;

use crate::{
    protocol::error::A2AError,
    transport::{error_for_status, ByteStream, Transport, TransportRequest, TransportResponse},
};

type Handler = dyn Fn(&TransportRequest) -> TransportResponse + Send + Sync;

/// Mock transport for internal testing
///
/// This transport is used for unit tests to mock agent responses without
/// requiring a real network connection or a mock HTTP server. Every request
/// is recorded for later inspection.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    base_url: Url,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            requests: Arc::new(Mutex::new(Vec::new())),
            base_url: Url::parse("http://mock.agent/").unwrap(),
        }
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, request: TransportRequest) -> TransportResponse {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        Ok(self.respond(request))
    }

    async fn execute_streaming(&self, request: TransportRequest) -> Result<ByteStream, A2AError> {
        let response = self.respond(request);
        if !response.is_success() {
            return Err(error_for_status(response.status, &response.body));
        }
        Ok(stream::once(async move { Ok(response.body) }).boxed())
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}

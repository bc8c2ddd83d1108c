//! HTTP transport implementation for A2A protocol

use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::debug;
use url::Url;

use crate::protocol::error::A2AError;

use super::{error_for_status, ByteStream, Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// This transport implements the HTTP binding of the A2A protocol. Card
/// discovery resolves against the base URL; messages are posted to the URL
/// the card advertises.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The runtime URL of the agent (e.g., "<http://127.0.0.1:9000>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn request_builder(&self, request: TransportRequest) -> Result<reqwest::RequestBuilder, A2AError> {
        let base = request.target.as_ref().unwrap_or(&self.base_url);
        let url = join_endpoint(base, &request.endpoint);

        let mut req_builder = match request.method.as_str() {
            "POST" => self.client.post(&url),
            "GET" => self.client.get(&url),
            _ => {
                return Err(A2AError::Transport(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )))
            }
        };

        debug!(method = %request.method, %url, "sending A2A request");

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        Ok(req_builder)
    }
}

/// Join an endpoint path onto a base URL
///
/// An empty endpoint addresses the base URL itself, trailing slash included.
fn join_endpoint(base: &Url, endpoint: &str) -> String {
    if endpoint.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[async_trait]
impl Transport for HttpTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        // HTTP client is always ready
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        let response = self.request_builder(request)?.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    async fn execute_streaming(&self, request: TransportRequest) -> Result<ByteStream, A2AError> {
        let response = self
            .request_builder(request.header("Accept", "text/event-stream"))?
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &body));
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(A2AError::from))
            .boxed())
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}

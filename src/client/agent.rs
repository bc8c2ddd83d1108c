//! High-level A2A agent client

use futures::{
    future,
    stream::{self, BoxStream, StreamExt},
};
use tower::ServiceExt;
use tower_service::Service;
use tracing::{info, warn};
use url::Url;

use crate::{
    client::{config::ClientConfig, tracker::TaskTracker},
    extract::ResponseEvent,
    protocol::{A2AError, A2AOperation, AgentCard, Message},
    service::{A2ARequest, A2AResponse, RequestContext},
};

/// Reply events of one sent message, in arrival order
pub type ResponseEventStream = BoxStream<'static, Result<ResponseEvent, A2AError>>;

/// High-level A2A client for interacting with agents
///
/// This client wraps a Tower service and provides convenient methods for common A2A operations.
/// The service is generic over any implementation that satisfies the Service trait bounds.
///
/// # Example
///
/// ```rust,no_run
/// use agentcore_a2a::prelude::*;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://127.0.0.1:9000".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url)
///     .with_bearer_auth("token")
///     .build()?;
///
/// let card = client.discover().await?;
/// client.use_card(&card)?;
///
/// let events = client.send_message(Message::user("Hello, agent!")).await?;
/// println!("{}", first_reply(events).await?);
/// # Ok(())
/// # }
/// ```
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
    target: Option<Url>,
}

impl<S> AgentClient<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            target: None,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL messages are sent to: the card's URL once one is in use, the
    /// runtime URL before that
    pub fn message_url(&self) -> &Url {
        self.target.as_ref().unwrap_or(&self.config.agent_url)
    }

    /// Build a request context targeting `url`
    fn build_context(&self, url: Url) -> RequestContext {
        RequestContext {
            agent_url: Some(url),
            auth: None, // Set by AuthLayer
            timeout: Some(self.config.timeout),
            metadata: Default::default(),
        }
    }

    async fn call(&mut self, request: A2ARequest) -> Result<A2AResponse, A2AError> {
        self.service.ready().await?.call(request).await
    }

    /// Discover the agent's capabilities by fetching its Agent Card
    ///
    /// The card is resolved against the runtime URL.
    pub async fn discover(&mut self) -> Result<AgentCard, A2AError> {
        let context = self.build_context(self.config.agent_url.clone());
        let response = self
            .call(A2ARequest::new(A2AOperation::DiscoverAgent, context))
            .await?;

        let card = response.into_agent_card().ok_or_else(|| {
            A2AError::Protocol("Expected agent card response from discover".into())
        })?;

        info!(agent = %card.name, url = %card.url, "resolved agent card");
        Ok(card)
    }

    /// Send subsequent messages to the URL the card advertises
    ///
    /// A card without a URL leaves the target unchanged.
    pub fn use_card(&mut self, card: &AgentCard) -> Result<(), A2AError> {
        if card.url.is_empty() {
            warn!(agent = %card.name, "agent card has no URL, sending to the runtime URL");
            return Ok(());
        }

        let url = Url::parse(&card.url).map_err(|e| {
            A2AError::Validation(format!("Agent card URL '{}' is invalid: {}", card.url, e))
        })?;
        self.target = Some(url);
        Ok(())
    }

    /// Send a message to the agent
    ///
    /// Without streaming the returned stream holds exactly one event. With
    /// streaming each server-sent event becomes one response event, task
    /// updates carrying the task as aggregated so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the message fails to send or the response is invalid
    pub async fn send_message(&mut self, message: Message) -> Result<ResponseEventStream, A2AError> {
        let operation = A2AOperation::SendMessage {
            message,
            stream: self.config.streaming,
        };

        let context = self.build_context(self.message_url().clone());
        let response = self.call(A2ARequest::new(operation, context)).await?;

        let mut tracker = TaskTracker::new();
        match response {
            A2AResponse::Event(event) => {
                let event = tracker.track(*event);
                Ok(stream::once(future::ready(Ok(event))).boxed())
            }
            A2AResponse::Events(events) => Ok(events
                .map(move |item| item.map(|event| tracker.track(event)))
                .boxed()),
            A2AResponse::AgentCard(_) => Err(A2AError::Protocol(
                "Expected message response from send_message".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        client::{builder::ClientStack, A2AClientBuilder},
        extract::{final_reply, first_reply},
        layer::SESSION_HEADER,
        transport::{mock::MockTransport, TransportResponse},
    };

    const CARD: &str = r#"{"name": "Calculator Agent", "url": "http://mock.agent/rpc/"}"#;

    fn client_for(transport: MockTransport, streaming: bool) -> AgentClient<ClientStack<MockTransport>> {
        A2AClientBuilder::new(Url::parse("http://mock.agent/").unwrap())
            .with_transport(transport)
            .with_bearer_auth("test-token")
            .with_session_id("session-1")
            .with_streaming(streaming)
            .build()
            .unwrap()
    }

    fn rpc_result(result: serde_json::Value) -> String {
        json!({"jsonrpc": "2.0", "id": "1", "result": result}).to_string()
    }

    #[tokio::test]
    async fn test_discover_and_send() {
        let transport = MockTransport::new(|req| match req.method.as_str() {
            "GET" => TransportResponse::new(200).body(CARD),
            _ => TransportResponse::new(200).body(rpc_result(json!({
                "kind": "message",
                "role": "agent",
                "messageId": "m-1",
                "parts": [{"kind": "text", "text": "1111"}]
            }))),
        });
        let mut client = client_for(transport.clone(), false);

        let card = client.discover().await.unwrap();
        assert_eq!(card.name, "Calculator Agent");
        client.use_card(&card).unwrap();
        assert_eq!(client.message_url().as_str(), "http://mock.agent/rpc/");

        let events = client.send_message(Message::user("what is 101 * 11")).await.unwrap();
        assert_eq!(first_reply(events).await.unwrap(), "1111");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].endpoint, "/.well-known/agent-card.json");
        assert_eq!(
            requests[1].target.as_ref().map(Url::as_str),
            Some("http://mock.agent/rpc/")
        );
        for request in &requests {
            assert_eq!(
                request.headers.get("Authorization").map(String::as_str),
                Some("Bearer test-token")
            );
            assert_eq!(
                request.headers.get(SESSION_HEADER).map(String::as_str),
                Some("session-1")
            );
        }
    }

    #[tokio::test]
    async fn test_send_without_card_uses_runtime_url() {
        let transport = MockTransport::new(|_| {
            TransportResponse::new(200).body(rpc_result(json!({
                "kind": "task",
                "id": "t",
                "contextId": "c",
                "status": {"state": "completed"},
                "artifacts": [{"artifactId": "a", "parts": [{"kind": "text", "text": "done"}]}]
            })))
        });
        let mut client = client_for(transport.clone(), false);

        let events = client.send_message(Message::user("go")).await.unwrap();
        assert_eq!(first_reply(events).await.unwrap(), "done");
        assert_eq!(
            transport.requests()[0].target.as_ref().map(Url::as_str),
            Some("http://mock.agent/")
        );
    }

    #[tokio::test]
    async fn test_card_without_url_keeps_target() {
        let mut client = client_for(MockTransport::new(|_| TransportResponse::new(200)), false);

        client.use_card(&AgentCard::new("bare", "")).unwrap();
        assert_eq!(client.message_url().as_str(), "http://mock.agent/");

        assert!(client.use_card(&AgentCard::new("bad", "::not a url::")).is_err());
    }

    #[tokio::test]
    async fn test_streaming_send_aggregates() {
        let body = [
            rpc_result(json!({"kind": "task", "id": "t", "contextId": "c", "status": {"state": "submitted"}})),
            rpc_result(json!({"kind": "artifact-update", "taskId": "t", "contextId": "c",
                "artifact": {"artifactId": "a", "parts": [{"kind": "text", "text": "11"}]}})),
            rpc_result(json!({"kind": "artifact-update", "taskId": "t", "contextId": "c", "append": true,
                "artifact": {"artifactId": "a", "parts": [{"kind": "text", "text": "11"}]}})),
            rpc_result(json!({"kind": "status-update", "taskId": "t", "contextId": "c",
                "status": {"state": "completed"}, "final": true})),
        ]
        .iter()
        .map(|data| format!("data: {}\n\n", data))
        .collect::<String>();

        let transport = MockTransport::new(move |_| TransportResponse::new(200).body(body.clone()));
        let mut client = client_for(transport.clone(), true);

        let events = client.send_message(Message::user("what is 101 * 11")).await.unwrap();
        assert_eq!(final_reply(events).await.unwrap(), "11");

        let sent: serde_json::Value = serde_json::from_slice(&transport.requests()[0].body).unwrap();
        assert_eq!(sent["method"], "message/stream");
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let transport = MockTransport::new(|_| TransportResponse::new(500).body("boom"));
        let mut client = client_for(transport, false);

        let result = client.discover().await;
        assert!(matches!(result, Err(A2AError::HttpStatus { status: 500, .. })));
    }
}

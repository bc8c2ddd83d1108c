//! Client builder for constructing A2A clients with composable layers

use std::{sync::Arc, time::Duration};

use tower::ServiceBuilder;
use url::Url;

use crate::{
    client::{config::DEFAULT_TIMEOUT, AgentClient, ClientConfig},
    codec::JsonRpcCodec,
    layer::{
        generate_session_id, A2AValidationLayer, A2AValidationService, AuthCredentials, AuthLayer,
        AuthService, SessionLayer, SessionService,
    },
    protocol::error::{A2AError, ConfigError},
    service::A2AProtocolService,
    transport::{HttpTransport, Transport},
};

/// The layered service a built client drives
///
/// Outermost first: validation, authentication, session header, protocol.
pub type ClientStack<T> =
    A2AValidationService<AuthService<SessionService<A2AProtocolService<T>>>>;

/// Builder for constructing A2A clients
///
/// This builder provides a fluent API for configuring and building an A2A client
/// with a bearer token, runtime session, timeout and validation settings.
///
/// # Example
///
/// ```rust,no_run
/// use agentcore_a2a::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://127.0.0.1:9000".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url)
///     .with_bearer_auth("token123")
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let agent_card = client.discover().await?;
/// println!("Connected to: {}", agent_card.name);
/// # Ok(())
/// # }
/// ```
pub struct A2AClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    auth: Option<AuthCredentials>,
    session_id: Option<String>,
    timeout: Duration,
    streaming: bool,
    validate_responses: bool,
}

impl<T: Transport> A2AClientBuilder<T> {
    /// Start a builder for the agent at `agent_url`
    ///
    /// A transport must be supplied with [`with_transport`](Self::with_transport).
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            auth: None,
            session_id: None,
            timeout: DEFAULT_TIMEOUT,
            streaming: false,
            validate_responses: true,
        }
    }

    /// Use a custom transport
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport implementation to use
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Enable bearer token authentication
    ///
    /// # Arguments
    ///
    /// * `token` - The bearer token for authentication
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::bearer(token));
        self
    }

    /// Join an existing runtime session instead of starting a new one
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the request timeout
    ///
    /// # Arguments
    ///
    /// * `timeout` - The timeout duration for requests (default: 300s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable streaming sends
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Enable or disable request and response validation
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether to validate (default: true)
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }

    /// Build the A2A client
    ///
    /// This assembles all the Tower layers and returns a configured client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credentials have been configured
    /// - No transport has been configured
    pub fn build(self) -> Result<AgentClient<ClientStack<T>>, A2AError> {
        let auth = self.auth.ok_or(ConfigError::MissingToken)?;

        let transport = self.transport.ok_or_else(|| {
            A2AError::Protocol("Transport not configured. Call with_transport()".into())
        })?;

        let session_id = self.session_id.unwrap_or_else(generate_session_id);

        let service = ServiceBuilder::new()
            .layer(A2AValidationLayer::new(self.validate_responses))
            .layer(AuthLayer::new(auth))
            .layer(SessionLayer::new(session_id.clone()))
            .service(A2AProtocolService::new(transport, Arc::new(JsonRpcCodec)));

        let config = ClientConfig::new(self.agent_url)
            .with_timeout(self.timeout)
            .with_streaming(self.streaming)
            .with_validation(self.validate_responses)
            .with_session_id(session_id);

        Ok(AgentClient::new(service, config))
    }
}

impl A2AClientBuilder<HttpTransport> {
    /// Create a new client builder with HTTP transport (JSON-RPC binding)
    ///
    /// # Arguments
    ///
    /// * `agent_url` - The runtime URL of the agent (e.g., "<http://127.0.0.1:9000>")
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self::new(agent_url).with_transport(transport)
    }
}

//! Runtime session layer
//!
//! Agent runtimes route every request carrying the same session header to the
//! same session, so a card fetch and the message that follows it must share
//! one id.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;
use uuid::Uuid;

use crate::{
    protocol::error::A2AError,
    service::{A2ARequest, A2AResponse},
};

/// Header carrying the runtime session id
pub const SESSION_HEADER: &str = "X-Amzn-Bedrock-AgentCore-Runtime-Session-Id";

/// Layer that stamps every request with one session id
#[derive(Clone, Debug)]
pub struct SessionLayer {
    session_id: String,
}

impl SessionLayer {
    /// Create a session layer for an existing session
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// Create a session layer with a freshly generated id
    pub fn generate() -> Self {
        Self::new(generate_session_id())
    }

    /// The id stamped on requests
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Generate a new session id (a hyphenated random UUID)
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            session_id: self.session_id.clone(),
        }
    }
}

/// Session service
#[derive(Clone, Debug)]
pub struct SessionService<S> {
    inner: S,
    session_id: String,
}

impl<S> Service<A2ARequest> for SessionService<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: A2ARequest) -> Self::Future {
        req.context
            .metadata
            .insert(SESSION_HEADER.to_string(), self.session_id.clone());

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

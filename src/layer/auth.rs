//! Authentication layer for A2A protocol

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::A2AError,
    service::{A2ARequest, A2AResponse},
};

/// Authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredentials {
    /// Bearer token authentication
    Bearer(String),
}

impl AuthCredentials {
    /// Create bearer token credentials
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Get the header name and value for this credential
    pub fn to_header(&self) -> (String, String) {
        match self {
            AuthCredentials::Bearer(token) => {
                ("Authorization".to_string(), format!("Bearer {}", token))
            }
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthCredentials::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// Authentication layer
#[derive(Clone, Debug)]
pub struct AuthLayer {
    credentials: AuthCredentials,
}

impl AuthLayer {
    /// Create a new authentication layer
    pub fn new(credentials: AuthCredentials) -> Self {
        Self { credentials }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            credentials: self.credentials.clone(),
        }
    }
}

/// Authentication service
#[derive(Clone, Debug)]
pub struct AuthService<S> {
    inner: S,
    credentials: AuthCredentials,
}

impl<S> Service<A2ARequest> for AuthService<S>
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
        // Inject credentials into request context
        req.context.auth = Some(self.credentials.clone());

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

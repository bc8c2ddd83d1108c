//! Validation layer for A2A protocol requests and responses

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::stream::StreamExt;
use tower_layer::Layer;
use tower_service::Service;
use url::Url;

use crate::{
    protocol::{error::A2AError, event::AgentEvent, message::Part, operation::A2AOperation},
    service::{A2ARequest, A2AResponse},
};

/// Layer that validates A2A protocol requests and responses
///
/// When disabled, requests and responses pass through untouched.
#[derive(Clone, Debug)]
pub struct A2AValidationLayer {
    enabled: bool,
}

impl A2AValidationLayer {
    /// Create a new validation layer
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for A2AValidationLayer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<S> Layer<S> for A2AValidationLayer {
    type Service = A2AValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        A2AValidationService {
            inner,
            enabled: self.enabled,
        }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone, Debug)]
pub struct A2AValidationService<S> {
    inner: S,
    enabled: bool,
}

/// Validate an A2A request
fn validate_request(req: &A2ARequest) -> Result<(), A2AError> {
    if let A2AOperation::SendMessage { message, .. } = &req.operation {
        if message.parts.is_empty() {
            return Err(A2AError::Validation(
                "Message must have at least one part".into(),
            ));
        }

        // Text is sent as given, empty included.
        for part in &message.parts {
            if let Part::File { file, .. } = part {
                if file.uri.is_none() && file.bytes.is_none() {
                    return Err(A2AError::Validation(
                        "File must have either URI or bytes content".into(),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Validate a single agent event
fn validate_event(event: &AgentEvent) -> Result<(), A2AError> {
    match event {
        AgentEvent::Task(task) if task.id.is_empty() => {
            Err(A2AError::Validation("Task ID cannot be empty".into()))
        }
        _ => Ok(()),
    }
}

/// Validate an A2A response
///
/// Streamed events are checked one by one as they are pulled.
fn validate_response(resp: A2AResponse) -> Result<A2AResponse, A2AError> {
    match resp {
        A2AResponse::AgentCard(card) => {
            if card.name.is_empty() {
                return Err(A2AError::Validation("Agent name cannot be empty".into()));
            }
            if !card.url.is_empty() {
                Url::parse(&card.url).map_err(|e| {
                    A2AError::Validation(format!("Agent card URL '{}' is invalid: {}", card.url, e))
                })?;
            }
            Ok(A2AResponse::AgentCard(card))
        }
        A2AResponse::Event(event) => {
            validate_event(&event)?;
            Ok(A2AResponse::Event(event))
        }
        A2AResponse::Events(events) => Ok(A2AResponse::Events(
            events
                .map(|item| {
                    let event = item?;
                    validate_event(&event)?;
                    Ok(event)
                })
                .boxed(),
        )),
    }
}

impl<S> Service<A2ARequest> for A2AValidationService<S>
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

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let mut inner = self.inner.clone();

        if !self.enabled {
            return Box::pin(async move { inner.call(req).await });
        }

        // Validate request before passing to inner service
        if let Err(e) = validate_request(&req) {
            return Box::pin(async move { Err(e) });
        }

        Box::pin(async move {
            let response = inner.call(req).await?;
            validate_response(response)
        })
    }
}

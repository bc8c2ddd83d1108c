//! A2A service request types

use std::{collections::HashMap, time::Duration};

use url::Url;

use crate::{layer::auth::AuthCredentials, protocol::operation::A2AOperation};

/// A request to the A2A service
///
/// This wraps an A2A operation with additional context needed for execution
#[derive(Debug, Clone)]
pub struct A2ARequest {
    /// The A2A operation to execute
    pub operation: A2AOperation,

    /// Request context (target, auth, timeouts, metadata)
    pub context: RequestContext,
}

impl A2ARequest {
    /// Create a new A2A request
    pub fn new(operation: A2AOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Request context containing metadata and configuration
///
/// Layers fill in the fields they own: auth and session headers are set by
/// their layers, the target by the client once a card has been resolved.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// URL of the target agent; the transport's base URL when unset
    pub agent_url: Option<Url>,

    /// Authentication credentials (if any)
    pub auth: Option<AuthCredentials>,

    /// Request timeout
    pub timeout: Option<Duration>,

    /// Additional metadata headers
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create a new request context targeting `agent_url`
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url: Some(agent_url),
            ..Self::default()
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_creation() {
        let context = RequestContext::new(Url::parse("https://example.com").unwrap())
            .with_timeout(Duration::from_secs(60))
            .with_metadata("key", "value");

        assert_eq!(
            context.agent_url.as_ref().map(Url::as_str),
            Some("https://example.com/")
        );
        assert_eq!(context.timeout, Some(Duration::from_secs(60)));
        assert_eq!(context.metadata.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_default_context_is_untargeted() {
        let context = RequestContext::default();
        assert!(context.agent_url.is_none());
        assert!(context.auth.is_none());
        assert!(context.timeout.is_none());
    }
}

//! Client configuration

use std::time::Duration;

use url::Url;

/// Default bound on a whole call, card fetch included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for an A2A client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Runtime URL of the agent; the agent card is resolved against it
    pub agent_url: Url,

    /// Default request timeout
    pub timeout: Duration,

    /// Send with `message/stream` and read the reply as server-sent events
    pub streaming: bool,

    /// Enable request and response validation
    pub validate_responses: bool,

    /// Runtime session the client's requests belong to
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            timeout: DEFAULT_TIMEOUT,
            streaming: false,
            validate_responses: true,
            session_id: None,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable streaming
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Enable or disable response validation
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }

    /// Record the session id
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

//! Runtime settings for the client shims
//!
//! Settings come from CLI flags or the environment and are validated into an
//! explicit [`RuntimeSettings`] value before any network call is made.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use url::Url;

use crate::{client::DEFAULT_TIMEOUT, protocol::error::ConfigError};

/// Runtime URL used when none is configured (a locally running agent)
pub const DEFAULT_RUNTIME_URL: &str = "http://127.0.0.1:9000";

/// Region used to build AgentCore runtime URLs
pub const DEFAULT_REGION: &str = "us-east-1";

/// Bytes escaped in an ARN path segment: everything but unreserved characters
const ARN_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Message the CLI sends when none is given
pub const DEFAULT_MESSAGE: &str =
    "what is the cosine of pi divided by 4 plus the square root of 16?";

/// Validated settings for talking to one agent runtime
#[derive(Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub runtime_url: Url,
    pub bearer_token: String,
    pub timeout: Duration,
    pub streaming: bool,
}

impl RuntimeSettings {
    /// Validate raw settings
    ///
    /// The URL is checked before the token. Empty values count as missing.
    pub fn new(runtime_url: Option<&str>, bearer_token: Option<&str>) -> Result<Self, ConfigError> {
        let runtime_url = runtime_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        let bearer_token = bearer_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let runtime_url = Url::parse(runtime_url).map_err(|e| ConfigError::InvalidUrl {
            url: runtime_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            runtime_url,
            bearer_token: bearer_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            streaming: false,
        })
    }

    /// Bound the whole call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the reply as a stream of server-sent events
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }
}

impl std::fmt::Debug for RuntimeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeSettings")
            .field("runtime_url", &self.runtime_url.as_str())
            .field("bearer_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("streaming", &self.streaming)
            .finish()
    }
}

/// Invocation URL of an agent hosted on Bedrock AgentCore
///
/// The ARN is percent-escaped as a single path segment. A blank ARN is
/// [`ConfigError::MissingAgentArn`].
pub fn agentcore_runtime_url(region: &str, agent_arn: &str) -> Result<Url, ConfigError> {
    let agent_arn = agent_arn.trim();
    if agent_arn.is_empty() {
        return Err(ConfigError::MissingAgentArn);
    }

    let escaped = utf8_percent_encode(agent_arn, ARN_SEGMENT).to_string();
    let url = format!(
        "https://bedrock-agentcore.{}.amazonaws.com/runtimes/{}/invocations/",
        region, escaped
    );

    Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
        url,
        reason: e.to_string(),
    })
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Environment of the HTTP server
///
/// Read with `envy`, so `COORDINATOR_AGENT_URL` fills `coordinator_agent_url`
/// and so on. Nothing here is validated until a route needs it: a missing
/// token only fails the requests that would use it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEnv {
    /// Agent the proxy route forwards to
    pub coordinator_agent_url: Option<String>,

    /// Agent the entrypoint route forwards to
    pub agentcore_runtime_url: Option<String>,

    pub bearer_token: Option<String>,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_timeout_secs")]
    pub a2a_timeout_secs: u64,
}

impl ServerEnv {
    /// Read the server environment from the process environment
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Settings for the proxy route
    pub fn proxy_settings(&self) -> Result<RuntimeSettings, ConfigError> {
        self.settings_for(self.coordinator_agent_url.as_deref())
    }

    /// Settings for the entrypoint route
    pub fn agent_settings(&self) -> Result<RuntimeSettings, ConfigError> {
        self.settings_for(self.agentcore_runtime_url.as_deref())
    }

    fn settings_for(&self, url: Option<&str>) -> Result<RuntimeSettings, ConfigError> {
        RuntimeSettings::new(url, self.bearer_token.as_deref())
            .map(|settings| settings.with_timeout(Duration::from_secs(self.a2a_timeout_secs)))
    }
}

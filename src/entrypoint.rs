//! Agent entrypoint handler
//!
//! The runtime invokes an agent with a JSON payload holding a `prompt`. The
//! handler forwards the prompt to a configured [`Agent`] and wraps the reply
//! as `{"result": ...}`. Agent failures never escape: they are reported in an
//! `error` field next to an apology.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::RuntimeSettings,
    invoke,
    protocol::error::{A2AError, A2AResult},
};

/// Prompt used when the payload does not carry one
pub const DEFAULT_PROMPT: &str = "Hello! How can I help you today?";

/// Result text reported alongside an agent failure
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request.";

/// Something that answers a prompt with text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Agent: Send + Sync {
    async fn respond(&self, prompt: &str) -> A2AResult<String>;
}

/// An agent reached over A2A, one session per prompt
#[derive(Debug, Clone)]
pub struct A2aRelayAgent {
    settings: RuntimeSettings,
}

impl A2aRelayAgent {
    pub fn new(settings: RuntimeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }
}

#[async_trait]
impl Agent for A2aRelayAgent {
    async fn respond(&self, prompt: &str) -> A2AResult<String> {
        invoke::send_message(&self.settings, prompt).await
    }
}

/// Body returned by the entrypoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrypointResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub result: String,
}

impl EntrypointResponse {
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            error: None,
            result: result.into(),
        }
    }

    /// The apology reply for a failed request
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            error: Some(format!("Failed to process request: {}", error)),
            result: APOLOGY.to_string(),
        }
    }
}

/// Read the prompt out of an entrypoint payload
///
/// The payload is either an object or a string. A string holding a JSON
/// object is read as that object; any other string is the prompt itself. A
/// missing or null `prompt` falls back to [`DEFAULT_PROMPT`] and a non-string
/// prompt is used as its JSON text.
pub fn prompt_from_payload(payload: &Value) -> A2AResult<String> {
    match payload {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => prompt_from_payload(&decoded),
            _ => Ok(text.clone()),
        },
        Value::Object(fields) => Ok(match fields.get("prompt") {
            None | Some(Value::Null) => DEFAULT_PROMPT.to_string(),
            Some(Value::String(prompt)) => prompt.clone(),
            Some(other) => other.to_string(),
        }),
        other => Err(A2AError::Validation(format!(
            "Entrypoint payload must be an object or a string, got {}",
            other
        ))),
    }
}

/// Answer one entrypoint payload with `agent`
pub async fn invoke<A>(agent: &A, payload: &Value) -> EntrypointResponse
where
    A: Agent + ?Sized,
{
    let outcome = match prompt_from_payload(payload) {
        Ok(prompt) => {
            debug!(%prompt, "entrypoint invoked");
            agent.respond(&prompt).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(text) => EntrypointResponse::ok(text),
        Err(e) => {
            error!(error = %e, "entrypoint request failed");
            EntrypointResponse::failed(e)
        }
    }
}

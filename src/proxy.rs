//! API-Gateway-style proxy handler
//!
//! Accepts a gateway event whose body holds a `message` (or `prompt`),
//! relays it to the coordinator agent and answers with a status code and a
//! JSON body of either `{"result": ...}` or `{"error": ...}`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::{
    entrypoint::Agent,
    protocol::error::{A2AError, ConfigError},
};

/// Inbound gateway event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// Request body, either raw JSON text or an already decoded object
    #[serde(default)]
    pub body: Option<Value>,

    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl ProxyEvent {
    pub fn with_body(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
            query_string_parameters: None,
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Gateway response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn json(status_code: u16, body: Value) -> Self {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, json!({ "error": message.into() }))
    }
}

/// Relay the message in `event` to `agent`
///
/// `agent` is the configured coordinator, or the reason it could not be
/// configured. Configuration problems are reported before the body is read.
pub async fn handle<A>(event: &ProxyEvent, agent: Result<&A, &ConfigError>) -> ProxyResponse
where
    A: Agent + ?Sized,
{
    let agent = match agent {
        Ok(agent) => agent,
        Err(e) => {
            error!(error = %e, "proxy is not configured");
            return ProxyResponse::error(500, config_message(e));
        }
    };

    let message = match message_from_body(event.body.as_ref()) {
        Ok(message) => message,
        Err(response) => return response,
    };

    info!(%message, "relaying message to coordinator agent");
    match agent.respond(&message).await {
        Ok(text) => ProxyResponse::json(200, json!({ "result": text })),
        Err(e) => {
            error!(error = %e, "coordinator agent call failed");
            ProxyResponse::error(500, agent_error_message(&e))
        }
    }
}

/// Greet the `name` query parameter
pub fn hello(event: &ProxyEvent) -> ProxyResponse {
    let name = event
        .query_string_parameters
        .as_ref()
        .and_then(|params| params.get("name"))
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or("world");

    ProxyResponse::json(200, json!({ "message": format!("Hello, {}!", name) }))
}

fn config_message(error: &ConfigError) -> String {
    match error {
        ConfigError::MissingUrl => "Coordinator agent URL not configured".to_string(),
        ConfigError::MissingToken => "Authentication token not configured".to_string(),
        other => format!("Internal error: {}", other),
    }
}

fn agent_error_message(error: &A2AError) -> String {
    match error {
        A2AError::Timeout => "Request timeout - agent took too long to respond".to_string(),
        A2AError::HttpStatus { status, .. } => format!("HTTP error: {}", status),
        A2AError::NoResponse => "No response from agent".to_string(),
        A2AError::Config(e) => config_message(e),
        other => format!("Internal error: {}", other),
    }
}

fn message_from_body(body: Option<&Value>) -> Result<String, ProxyResponse> {
    let body = match body {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).map_err(|e| {
            warn!(error = %e, "proxy body is not valid JSON");
            ProxyResponse::error(400, "Invalid JSON in request body")
        })?,
        Some(value) => value.clone(),
        None => Value::Null,
    };

    ["message", "prompt"]
        .iter()
        .filter_map(|field| body.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProxyResponse::error(400, "Missing 'message' in request body"))
}

//! HTTP surface hosting the entrypoint and proxy handlers
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /ping` | health check |
//! | `POST /invocations` | [`entrypoint::invoke`] |
//! | `POST /message` | [`proxy::handle`] |
//! | `GET /hello` | [`proxy::hello`] |

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    config::ServerEnv,
    entrypoint::{self, A2aRelayAgent, Agent, EntrypointResponse},
    protocol::error::ConfigError,
    proxy::{self, ProxyEvent, ProxyResponse},
};

type ConfiguredAgent = Result<Arc<dyn Agent>, ConfigError>;

/// Agents the routes forward to
///
/// A route whose agent could not be configured stays up and reports the
/// configuration error on every request.
#[derive(Clone)]
pub struct AppState {
    entrypoint: ConfiguredAgent,
    proxy: ConfiguredAgent,
}

impl AppState {
    pub fn new(entrypoint: ConfiguredAgent, proxy: ConfiguredAgent) -> Self {
        Self { entrypoint, proxy }
    }

    /// Relay agents built from the server environment
    pub fn from_env(env: &ServerEnv) -> Self {
        let relay = |settings: Result<_, ConfigError>| -> ConfiguredAgent {
            settings.map(|settings| Arc::new(A2aRelayAgent::new(settings)) as Arc<dyn Agent>)
        };

        Self::new(relay(env.agent_settings()), relay(env.proxy_settings()))
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                header::HeaderName::try_from(name.as_str()),
                header::HeaderValue::try_from(value.as_str()),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

/// Build the router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/invocations", post(invocations))
        .route("/message", post(message))
        .route("/hello", get(hello))
        .with_state(state)
}

/// Serve the routes on `bind_address` until the process stops
pub async fn serve(bind_address: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await
}

async fn ping() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn invocations(State(state): State<AppState>, body: Bytes) -> Json<EntrypointResponse> {
    let payload = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let response = match &state.entrypoint {
        Ok(agent) => entrypoint::invoke(agent.as_ref(), &payload).await,
        Err(e) => EntrypointResponse::failed(e),
    };
    Json(response)
}

async fn message(State(state): State<AppState>, body: Bytes) -> ProxyResponse {
    let event = ProxyEvent::with_body(String::from_utf8_lossy(&body).into_owned());
    proxy::handle(&event, state.proxy.as_ref().map(|agent| agent.as_ref())).await
}

async fn hello(Query(params): Query<HashMap<String, String>>) -> ProxyResponse {
    proxy::hello(&ProxyEvent {
        body: None,
        query_string_parameters: Some(params),
    })
}

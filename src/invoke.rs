//! One-shot invocation of an agent runtime
//!
//! Each call opens a fresh runtime session, resolves the agent card, sends a
//! single user message and reduces the reply to text. The whole exchange is
//! bounded by the configured timeout.

use std::future::Future;

use tracing::{info, warn};

use crate::{
    client::A2AClientBuilder,
    config::RuntimeSettings,
    extract::{final_reply, first_reply},
    layer::generate_session_id,
    protocol::{
        agent::AgentCard,
        error::{A2AError, A2AResult},
        message::Message,
    },
    transport::{HttpTransport, Transport},
};

/// Send `text` to the agent and return its reply text
pub async fn send_message(settings: &RuntimeSettings, text: &str) -> A2AResult<String> {
    send_message_over(HttpTransport::new(settings.runtime_url.clone()), settings, text).await
}

/// Send `text` to the agent over `transport` and return its reply text
pub async fn send_message_over<T: Transport>(
    transport: T,
    settings: &RuntimeSettings,
    text: &str,
) -> A2AResult<String> {
    let session_id = generate_session_id();
    info!(%session_id, url = %settings.runtime_url, "sending message to agent");

    bounded(settings, async {
        let mut client = A2AClientBuilder::new(settings.runtime_url.clone())
            .with_transport(transport)
            .with_bearer_auth(settings.bearer_token.clone())
            .with_session_id(session_id)
            .with_timeout(settings.timeout)
            .with_streaming(settings.streaming)
            .build()?;

        let card = client.discover().await?;
        client.use_card(&card)?;

        let events = client.send_message(Message::user(text)).await?;
        if settings.streaming {
            final_reply(events).await
        } else {
            first_reply(events).await
        }
    })
    .await
}

/// Fetch the agent card published by the runtime
pub async fn fetch_card(settings: &RuntimeSettings) -> A2AResult<AgentCard> {
    fetch_card_over(HttpTransport::new(settings.runtime_url.clone()), settings).await
}

/// Fetch the agent card published by the runtime over `transport`
pub async fn fetch_card_over<T: Transport>(
    transport: T,
    settings: &RuntimeSettings,
) -> A2AResult<AgentCard> {
    let session_id = generate_session_id();
    info!(%session_id, url = %settings.runtime_url, "fetching agent card");

    bounded(settings, async {
        A2AClientBuilder::new(settings.runtime_url.clone())
            .with_transport(transport)
            .with_bearer_auth(settings.bearer_token.clone())
            .with_session_id(session_id)
            .with_timeout(settings.timeout)
            .build()?
            .discover()
            .await
    })
    .await
}

async fn bounded<F, R>(settings: &RuntimeSettings, exchange: F) -> A2AResult<R>
where
    F: Future<Output = A2AResult<R>>,
{
    let result = match tokio::time::timeout(settings.timeout, exchange).await {
        Ok(result) => result,
        Err(_) => Err(A2AError::Timeout),
    };

    if let Err(error) = &result {
        warn!(%error, url = %settings.runtime_url, "agent call failed");
    }
    result
}

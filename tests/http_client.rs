//! End-to-end client tests against a mock agent runtime

use std::time::Duration;

use agentcore_a2a::{
    client::A2AClientBuilder,
    config::RuntimeSettings,
    invoke,
    layer::SESSION_HEADER,
    protocol::{A2AError, Message},
};
use serde_json::{json, Value};
use url::Url;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const CARD_PATH: &str = "/.well-known/agent-card.json";

fn card_for(server: &MockServer) -> Value {
    json!({
        "name": "Calculator Agent",
        "description": "Does arithmetic",
        "url": format!("{}/", server.uri()),
        "version": "1.0.0",
        "capabilities": {"streaming": true}
    })
}

fn rpc_result(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": "1", "result": result})
}

fn settings_for(server: &MockServer) -> RuntimeSettings {
    RuntimeSettings::new(Some(&server.uri()), Some("test-token")).unwrap()
}

async fn mount_card(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CARD_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_for(server)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_message_end_to_end() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "kind": "message",
            "role": "agent",
            "messageId": "reply-1",
            "parts": [{"kind": "text", "text": "1111"}]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let reply = invoke::send_message(&settings_for(&server), "what is 101 * 11")
        .await
        .unwrap();
    assert_eq!(reply, "1111");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let sessions: Vec<_> = requests
        .iter()
        .map(|request| {
            request
                .headers
                .get(SESSION_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .collect();
    assert!(sessions[0].is_some());
    assert_eq!(sessions[0], sessions[1]);

    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["method"], "message/send");
    assert_eq!(body["params"]["message"]["role"], "user");
    assert_eq!(body["params"]["message"]["parts"][0]["text"], "what is 101 * 11");
}

#[tokio::test]
async fn test_task_reply() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "kind": "task",
            "id": "task-1",
            "contextId": "ctx-1",
            "status": {"state": "completed"},
            "artifacts": [
                {"artifactId": "a1", "parts": [{"kind": "text", "text": "0.7071 + 4 = 4.7071"}]},
                {"artifactId": "a2", "parts": [{"kind": "text", "text": "ignored"}]}
            ]
        }))))
        .mount(&server)
        .await;

    let reply = invoke::send_message(&settings_for(&server), "cos(pi/4) + sqrt(16)")
        .await
        .unwrap();
    assert_eq!(reply, "0.7071 + 4 = 4.7071");
}

#[tokio::test]
async fn test_streaming_reply() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    let events = [
        rpc_result(json!({"kind": "task", "id": "t", "contextId": "c", "status": {"state": "submitted"}})),
        rpc_result(json!({"kind": "status-update", "taskId": "t", "contextId": "c",
            "status": {"state": "working"}, "final": false})),
        rpc_result(json!({"kind": "artifact-update", "taskId": "t", "contextId": "c",
            "artifact": {"artifactId": "answer", "parts": [{"kind": "text", "text": "1111"}]},
            "lastChunk": true})),
        rpc_result(json!({"kind": "status-update", "taskId": "t", "contextId": "c",
            "status": {"state": "completed"}, "final": true})),
    ];
    let body: String = events
        .iter()
        .map(|event| format!("data: {}\n\n", event))
        .collect();

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("Accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings_for(&server).with_streaming(true);
    let reply = invoke::send_message(&settings, "what is 101 * 11").await.unwrap();
    assert_eq!(reply, "1111");

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(sent["method"], "message/stream");
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let result = invoke::send_message(&settings_for(&server), "hi").await;
    assert!(matches!(result, Err(A2AError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_unauthorized_card_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CARD_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = invoke::send_message(&settings_for(&server), "hi").await;
    assert!(matches!(result, Err(A2AError::HttpStatus { status: 401, .. })));
}

#[tokio::test]
async fn test_missing_token_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(RuntimeSettings::new(Some(&server.uri()), None).is_err());

    let url = Url::parse(&server.uri()).unwrap();
    let result = A2AClientBuilder::new_http(url).build();
    assert!(matches!(result, Err(A2AError::Config(_))));
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let settings = settings_for(&server).with_timeout(Duration::from_millis(200));
    let result = invoke::send_message(&settings, "hi").await;
    assert!(matches!(result, Err(A2AError::Timeout)));
}

#[tokio::test]
async fn test_client_discover_and_send() {
    let server = MockServer::start().await;
    mount_card(&server).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header(SESSION_HEADER, "fixed-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!({
            "kind": "message",
            "role": "agent",
            "parts": [{"kind": "text", "text": "pong"}]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&server.uri()).unwrap();
    let mut client = A2AClientBuilder::new_http(url)
        .with_bearer_auth("test-token")
        .with_session_id("fixed-session")
        .build()
        .unwrap();

    let card = client.discover().await.unwrap();
    assert_eq!(card.name, "Calculator Agent");
    client.use_card(&card).unwrap();

    let events = client.send_message(Message::user("ping")).await.unwrap();
    let reply = agentcore_a2a::extract::first_reply(events).await.unwrap();
    assert_eq!(reply, "pong");
}

#[tokio::test]
async fn test_fetch_card_under_runtime_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/runtimes/arn%3Aaws%3Aruntime%2Fcalc/invocations{}",
            CARD_PATH
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_for(&server)))
        .expect(1)
        .mount(&server)
        .await;

    let runtime_url = format!("{}/runtimes/arn%3Aaws%3Aruntime%2Fcalc/invocations/", server.uri());
    let settings = RuntimeSettings::new(Some(&runtime_url), Some("test-token")).unwrap();

    let card = invoke::fetch_card(&settings).await.unwrap();
    assert_eq!(card.name, "Calculator Agent");
}

//! Wire format tests
//!
//! These pin the JSON shapes exchanged with A2A agent runtimes and the text
//! a client reads out of each reply shape.

use agentcore_a2a::{
    client::TaskTracker,
    codec::{Codec, JsonRpcCodec},
    extract::{extract, ExtractionResult, ResponseEvent, NO_TEXT_CONTENT},
    protocol::{A2AOperation, AgentCard, AgentEvent, Message, Part, SecurityScheme, Task, TaskState},
    service::A2AResponse,
};
use serde_json::json;

#[test]
fn test_outbound_message_shape() {
    let message = Message::user("what is 101 * 11");
    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["kind"], "message");
    assert_eq!(json["role"], "user");
    assert_eq!(json["parts"], json!([{"kind": "text", "text": "what is 101 * 11"}]));
    assert!(json["messageId"].is_string());
    assert!(json.get("taskId").is_none());
    assert!(json.get("contextId").is_none());
}

#[test]
fn test_send_request_envelope() {
    let operation = A2AOperation::SendMessage {
        message: Message::user("hello"),
        stream: false,
    };
    let body = JsonRpcCodec.encode_request(&operation).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["method"], "message/send");
    assert_eq!(json["params"]["configuration"], json!({"blocking": true}));
    assert_eq!(json["params"]["message"]["parts"][0]["text"], "hello");
    assert!(json["id"].is_string());
}

#[test]
fn test_stream_request_envelope() {
    let operation = A2AOperation::SendMessage {
        message: Message::user("hello"),
        stream: true,
    };
    let body = JsonRpcCodec.encode_request(&operation).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["method"], "message/stream");
}

#[test]
fn test_discovery_has_no_body() {
    let body = JsonRpcCodec
        .encode_request(&A2AOperation::DiscoverAgent)
        .unwrap();
    assert!(body.is_empty());
}

#[test]
fn test_runtime_agent_card() {
    let card: AgentCard = serde_json::from_value(json!({
        "name": "Calculator Agent",
        "description": "Does arithmetic",
        "url": "https://runtime.example.com/invocations/",
        "version": "1.0.0",
        "protocolVersion": "0.3.0",
        "preferredTransport": "JSONRPC",
        "capabilities": {"streaming": true},
        "defaultInputModes": ["text"],
        "defaultOutputModes": ["text"],
        "skills": [{"id": "calc", "name": "Calculator", "description": "Math", "tags": ["math"]}],
        "securitySchemes": {
            "bearer": {"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}
        }
    }))
    .unwrap();

    assert_eq!(card.name, "Calculator Agent");
    assert!(card.capabilities.streaming);
    assert_eq!(card.skills[0].id, "calc");
    assert!(matches!(
        card.security_schemes.get("bearer"),
        Some(SecurityScheme::Http { scheme, .. }) if scheme == "bearer"
    ));
}

#[test]
fn test_unknown_part_kinds_are_not_text() {
    let message: Message = serde_json::from_value(json!({
        "kind": "message",
        "role": "agent",
        "parts": [
            {"kind": "text", "text": "visible"},
            {"kind": "hologram", "beam": 3},
            {"kind": "data", "data": {"x": 1}}
        ]
    }))
    .unwrap();

    assert_eq!(message.parts[1], Part::Unsupported);
    assert_eq!(
        extract(&ResponseEvent::DirectMessage(message)),
        ExtractionResult::Text("visible".to_string())
    );
}

#[test]
fn test_message_reply_text() {
    let response = JsonRpcCodec
        .decode_response(
            json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": {
                    "kind": "message",
                    "role": "agent",
                    "parts": [
                        {"kind": "text", "text": "The answer"},
                        {"kind": "text", "text": "is 1111"}
                    ]
                }
            })
            .to_string()
            .as_bytes(),
            &A2AOperation::SendMessage {
                message: Message::user("q"),
                stream: false,
            },
        )
        .unwrap();

    let event = response.into_event().unwrap();
    let reply = TaskTracker::new().track(event);
    assert_eq!(extract(&reply).into_text(), "The answer is 1111");
}

#[test]
fn test_message_without_text() {
    let message = Message::agent("ignored").with_parts(vec![Part::data(json!({"n": 1}))]);
    assert_eq!(
        extract(&ResponseEvent::DirectMessage(message)).into_text(),
        NO_TEXT_CONTENT
    );
}

#[test]
fn test_task_reply_uses_first_artifact_text() {
    let event = AgentEvent::from_value(json!({
        "kind": "task",
        "id": "task-1",
        "contextId": "ctx-1",
        "status": {"state": "completed", "timestamp": "2025-01-01T00:00:00Z"},
        "artifacts": [
            {"artifactId": "a1", "parts": [{"kind": "data", "data": {}}]},
            {"artifactId": "a2", "parts": [{"kind": "text", "text": "first"}]},
            {"artifactId": "a3", "parts": [{"kind": "text", "text": "second"}]}
        ]
    }));

    let reply = TaskTracker::new().track(event);
    match &reply {
        ResponseEvent::TaskUpdate { task, update } => {
            assert_eq!(task.status.state, TaskState::Completed);
            assert!(update.is_none());
        }
        other => panic!("expected a task update, got {:?}", other),
    }
    assert_eq!(extract(&reply).into_text(), "first");
}

#[test]
fn test_task_without_text_renders_as_json() {
    let reply = ResponseEvent::TaskUpdate {
        task: Box::new(Task::new("task-1", "ctx-1")),
        update: None,
    };

    let text = extract(&reply).into_text();
    let rendered: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rendered["task"]["id"], "task-1");
    assert_eq!(rendered["update"], serde_json::Value::Null);
}

#[test]
fn test_unknown_event_kind() {
    let event = AgentEvent::from_value(json!({"kind": "telemetry", "cpu": 0.5}));
    let reply = TaskTracker::new().track(event);

    assert!(matches!(reply, ResponseEvent::Unknown { .. }));
    let rendered: serde_json::Value = serde_json::from_str(&extract(&reply).into_text()).unwrap();
    assert_eq!(rendered, json!({"kind": "telemetry", "cpu": 0.5}));
}

#[test]
fn test_jsonrpc_error_reply() {
    let result = JsonRpcCodec.decode_response(
        br#"{"jsonrpc": "2.0", "id": "1", "error": {"code": -32601, "message": "Method not found"}}"#,
        &A2AOperation::SendMessage {
            message: Message::user("q"),
            stream: false,
        },
    );

    assert!(matches!(
        result,
        Err(agentcore_a2a::protocol::A2AError::JsonRpc { code: -32601, .. })
    ));
}

#[test]
fn test_card_response_decodes() {
    let response = JsonRpcCodec
        .decode_response(
            br#"{"name": "Echo", "url": "http://localhost:9000/"}"#,
            &A2AOperation::DiscoverAgent,
        )
        .unwrap();

    assert!(matches!(response, A2AResponse::AgentCard(card) if card.name == "Echo"));
}

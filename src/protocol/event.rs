//! Events an agent emits in reply to a message

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    message::{Message, MESSAGE_KIND},
    task::{Artifact, Task, TaskStatus, TASK_KIND},
};

pub(crate) const STATUS_UPDATE_KIND: &str = "status-update";
pub(crate) const ARTIFACT_UPDATE_KIND: &str = "artifact-update";

fn status_update_kind() -> String {
    STATUS_UPDATE_KIND.to_string()
}

fn artifact_update_kind() -> String {
    ARTIFACT_UPDATE_KIND.to_string()
}

/// Notification that a task's status has changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdateEvent {
    /// Discriminator, always "status-update"
    #[serde(default = "status_update_kind")]
    pub kind: String,

    pub task_id: String,

    #[serde(default)]
    pub context_id: String,

    /// The new status
    pub status: TaskStatus,

    /// Whether this is the last event of the stream
    #[serde(rename = "final", default)]
    pub is_final: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Notification that an artifact was produced or extended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskArtifactUpdateEvent {
    /// Discriminator, always "artifact-update"
    #[serde(default = "artifact_update_kind")]
    pub kind: String,

    pub task_id: String,

    #[serde(default)]
    pub context_id: String,

    pub artifact: Artifact,

    /// Append the parts to a previously sent artifact with the same id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    /// Whether this is the last chunk of the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_chunk: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// The update that accompanied a task snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TaskUpdateEvent {
    Status(TaskStatusUpdateEvent),
    Artifact(TaskArtifactUpdateEvent),
}

/// A single result payload returned by an agent
///
/// Payloads are dispatched on their `kind` field. Anything that is not a
/// recognised kind, or that fails to decode as its kind, is kept verbatim in
/// [`AgentEvent::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Message(Message),
    Task(Box<Task>),
    StatusUpdate(TaskStatusUpdateEvent),
    ArtifactUpdate(TaskArtifactUpdateEvent),
    Other(Value),
}

impl AgentEvent {
    /// Decode a JSON-RPC result payload
    pub fn from_value(value: Value) -> Self {
        let decoded = match value.get("kind").and_then(Value::as_str) {
            Some(MESSAGE_KIND) => serde_json::from_value(value.clone()).map(AgentEvent::Message),
            Some(TASK_KIND) => {
                serde_json::from_value(value.clone()).map(|task| AgentEvent::Task(Box::new(task)))
            }
            Some(STATUS_UPDATE_KIND) => {
                serde_json::from_value(value.clone()).map(AgentEvent::StatusUpdate)
            }
            Some(ARTIFACT_UPDATE_KIND) => {
                serde_json::from_value(value.clone()).map(AgentEvent::ArtifactUpdate)
            }
            _ => return AgentEvent::Other(value),
        };

        decoded.unwrap_or_else(|error| {
            debug!(%error, "keeping undecodable agent event as raw JSON");
            AgentEvent::Other(value)
        })
    }

    /// Whether the agent signalled that no further events follow
    pub fn is_final(&self) -> bool {
        match self {
            AgentEvent::Message(_) => true,
            AgentEvent::Task(task) => task.is_terminal(),
            AgentEvent::StatusUpdate(update) => update.is_final || update.status.state.is_terminal(),
            AgentEvent::ArtifactUpdate(_) | AgentEvent::Other(_) => false,
        }
    }
}

impl<'de> Deserialize<'de> for AgentEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(AgentEvent::from_value)
    }
}

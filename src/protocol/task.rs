//! A2A task types and lifecycle

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::{Message, Part};

pub(crate) const TASK_KIND: &str = "task";

fn task_kind() -> String {
    TASK_KIND.to_string()
}

/// A task in the A2A protocol
///
/// Tasks represent the agent's processing of a message. The final answer of
/// an agent is stored in the task's artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Context ID grouping related tasks and messages
    #[serde(default)]
    pub context_id: String,

    /// Discriminator, always "task"
    #[serde(default = "task_kind")]
    pub kind: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Outputs produced by the task, in production order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,

    /// Messages exchanged while the task was processed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Task {
    /// Create a new submitted task
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context_id: context_id.into(),
            kind: task_kind(),
            status: TaskStatus::new(TaskState::Submitted),
            artifacts: Vec::new(),
            history: Vec::new(),
            metadata: None,
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Append an artifact
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Text of the first text part found scanning artifacts, then parts, in order
    pub fn first_artifact_text(&self) -> Option<&str> {
        self.artifacts
            .iter()
            .flat_map(|artifact| artifact.parts.iter())
            .find_map(Part::as_text)
    }

    /// Merge an artifact chunk into the task
    ///
    /// With `append`, parts are added to an existing artifact of the same id.
    /// Otherwise an artifact with the same id is replaced, or the artifact is
    /// added at the end.
    pub fn merge_artifact(&mut self, artifact: Artifact, append: bool) {
        let existing = self
            .artifacts
            .iter_mut()
            .find(|a| a.artifact_id == artifact.artifact_id);

        match existing {
            Some(current) if append => current.parts.extend(artifact.parts),
            Some(current) => *current = artifact,
            None => self.artifacts.push(artifact),
        }
    }
}

/// Status of a task at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Lifecycle state
    pub state: TaskState,

    /// Optional message from the agent accompanying the state change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// When the status was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    /// Create a status for the given state, stamped now
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Some(Utc::now()),
        }
    }
}

/// Task state in the A2A protocol lifecycle
///
/// Task lifecycle: submitted → working → completed/failed/canceled/rejected
/// Non-terminal states: input-required, auth-required (awaiting client input)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    AuthRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    Unknown,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed | TaskState::Rejected
        )
    }

    /// Check if this state requires client action
    pub fn requires_action(&self) -> bool {
        matches!(self, TaskState::InputRequired | TaskState::AuthRequired)
    }
}

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique identifier of the Artifact
    pub artifact_id: String,

    /// A human readable name for the Artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// A human readable description of the Artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contents of the Artifact
    #[serde(default)]
    pub parts: Vec<Part>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Artifact {
    /// Create an artifact from its parts
    pub fn new(artifact_id: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            name: None,
            description: None,
            parts,
            metadata: None,
        }
    }
}

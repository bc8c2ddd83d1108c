//! Aggregation of streamed task updates into task snapshots

use tracing::debug;

use crate::{
    extract::ResponseEvent,
    protocol::{
        event::{AgentEvent, TaskUpdateEvent},
        task::Task,
    },
};

/// Tracks the task a stream of agent events is about
///
/// Status and artifact updates are folded into the current task snapshot so
/// that every emitted [`ResponseEvent::TaskUpdate`] carries the task as it
/// stands after that update.
#[derive(Debug, Default)]
pub struct TaskTracker {
    current: Option<Task>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The task snapshot as of the last tracked event
    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    /// Fold one event into the snapshot and turn it into a response event
    pub fn track(&mut self, event: AgentEvent) -> ResponseEvent {
        match event {
            AgentEvent::Message(message) => ResponseEvent::DirectMessage(message),
            AgentEvent::Task(task) => {
                self.current = Some((*task).clone());
                ResponseEvent::TaskUpdate { task, update: None }
            }
            AgentEvent::StatusUpdate(update) => {
                let task = self.task_for(&update.task_id, &update.context_id);
                task.status = update.status.clone();
                if let Some(message) = &update.status.message {
                    task.history.push(message.clone());
                }
                ResponseEvent::TaskUpdate {
                    task: Box::new(task.clone()),
                    update: Some(TaskUpdateEvent::Status(update)),
                }
            }
            AgentEvent::ArtifactUpdate(update) => {
                let task = self.task_for(&update.task_id, &update.context_id);
                task.merge_artifact(update.artifact.clone(), update.append.unwrap_or(false));
                ResponseEvent::TaskUpdate {
                    task: Box::new(task.clone()),
                    update: Some(TaskUpdateEvent::Artifact(update)),
                }
            }
            AgentEvent::Other(raw) => ResponseEvent::Unknown { raw },
        }
    }

    fn task_for(&mut self, task_id: &str, context_id: &str) -> &mut Task {
        self.current.get_or_insert_with(|| {
            debug!(task_id, "update arrived before any task snapshot");
            Task::new(task_id, context_id)
        })
    }
}

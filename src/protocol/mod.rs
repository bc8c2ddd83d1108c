//! Core A2A protocol types and definitions

pub mod agent;
pub mod error;
pub mod event;
pub mod message;
pub mod operation;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill, SecurityScheme, AGENT_CARD_PATH};
pub use error::{A2AError, A2AResult, ConfigError};
pub use event::{AgentEvent, TaskArtifactUpdateEvent, TaskStatusUpdateEvent, TaskUpdateEvent};
pub use message::{FileContent, Message, Part, Role};
pub use operation::A2AOperation;
pub use task::{Artifact, Task, TaskState, TaskStatus};

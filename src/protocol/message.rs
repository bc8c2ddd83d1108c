//! A2A message types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const MESSAGE_KIND: &str = "message";

fn message_kind() -> String {
    MESSAGE_KIND.to_string()
}

/// A message in the A2A protocol
///
/// Messages carry one turn of communication between a client and an agent.
/// Each message has a role, one or more parts (text, file, or data) and
/// optional identifiers tying it to a task or conversation context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Discriminator, always "message"
    #[serde(default = "message_kind")]
    pub kind: String,

    /// Role of the message sender
    pub role: Role,

    /// Message content parts
    pub parts: Vec<Part>,

    /// Message identifier (hex UUID for messages created here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Optional task identifier (for associating message with a task)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Optional context identifier (for multi-turn conversations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Optional metadata for the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Message {
    /// Create a new message with a single text part and a fresh message id
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            kind: message_kind(),
            role,
            parts: vec![Part::text(text)],
            message_id: Some(Uuid::new_v4().simple().to_string()),
            task_id: None,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Add a message part
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Replace all message parts
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    /// Set the context ID
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Add a metadata field to the message
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Iterate over the text of every text part, in order
    pub fn text_parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(Part::as_text)
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

/// File content for file parts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Name of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// URI reference to the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Base64-encoded file content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
}

/// A part of a message or artifact, discriminated by `kind`
///
/// Parts of a kind this crate does not know decode to [`Part::Unsupported`]
/// instead of failing the whole message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Text content
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },

    /// File reference or inline file bytes
    File {
        file: FileContent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },

    /// Structured data
    Data {
        data: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },

    #[serde(other)]
    Unsupported,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// Create a file part with URI reference
    pub fn file_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::File {
            file: FileContent {
                name: Some(name.into()),
                uri: Some(uri.into()),
                ..FileContent::default()
            },
            metadata: None,
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self::Data {
            data,
            metadata: None,
        }
    }

    /// The text of this part, if it is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

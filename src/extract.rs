//! Response extraction
//!
//! An agent answers a message with either a direct message or a task whose
//! artifacts hold the answer. Callers of the shims only want one string, so
//! this module reduces a [`ResponseEvent`] to the text a human would read.
//!
//! Extraction never fails: events without usable text are rendered as their
//! JSON representation instead.

use std::{fmt, pin::pin};

use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::protocol::{
    error::{A2AError, A2AResult},
    event::TaskUpdateEvent,
    message::Message,
    task::Task,
};

/// Text reported when a direct message carries no text parts
pub const NO_TEXT_CONTENT: &str = "No text content found";

/// One reply event as seen by a client
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEvent {
    /// The agent answered with a message
    DirectMessage(Message),

    /// The agent answered with a task snapshot, optionally with the update
    /// that produced it
    TaskUpdate {
        task: Box<Task>,
        update: Option<TaskUpdateEvent>,
    },

    /// A payload of a kind this crate does not understand
    Unknown { raw: Value },
}

#[derive(Serialize)]
struct TaskUpdateView<'a> {
    task: &'a Task,
    update: &'a Option<TaskUpdateEvent>,
}

/// Compact JSON, except that a raw JSON string is shown without quotes
impl fmt::Display for ResponseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            ResponseEvent::Unknown {
                raw: Value::String(text),
            } => return f.write_str(text),
            ResponseEvent::Unknown { raw } => serde_json::to_string(raw),
            ResponseEvent::DirectMessage(message) => serde_json::to_string(message),
            ResponseEvent::TaskUpdate { task, update } => {
                serde_json::to_string(&TaskUpdateView { task, update })
            }
        };
        f.write_str(&rendered.map_err(|_| fmt::Error)?)
    }
}

/// The outcome of extracting text from one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Text(String),

    /// A direct message without any text part
    Empty,
}

impl ExtractionResult {
    /// The text to show, with [`NO_TEXT_CONTENT`] standing in for an empty reply
    pub fn into_text(self) -> String {
        match self {
            ExtractionResult::Text(text) => text,
            ExtractionResult::Empty => NO_TEXT_CONTENT.to_string(),
        }
    }
}

/// Extract the human-readable text of one event
///
/// - A direct message yields its text parts joined by single spaces.
/// - A task update yields the first text part of the first artifact that has
///   one, scanning artifacts and parts in order.
/// - Anything else, including a task without artifact text, yields the
///   event's string form.
pub fn extract(event: &ResponseEvent) -> ExtractionResult {
    match event {
        ResponseEvent::DirectMessage(message) => {
            let texts: Vec<&str> = message.text_parts().collect();
            if texts.is_empty() {
                ExtractionResult::Empty
            } else {
                ExtractionResult::Text(texts.join(" "))
            }
        }
        ResponseEvent::TaskUpdate { task, .. } => match task.first_artifact_text() {
            Some(text) => ExtractionResult::Text(text.to_string()),
            None => ExtractionResult::Text(event.to_string()),
        },
        ResponseEvent::Unknown { .. } => ExtractionResult::Text(event.to_string()),
    }
}

/// Extract the reply from the first event of a stream
///
/// The rest of the stream is dropped unread.
pub async fn first_reply<S>(events: S) -> A2AResult<String>
where
    S: Stream<Item = A2AResult<ResponseEvent>>,
{
    let mut events = pin!(events);
    match events.next().await {
        Some(event) => Ok(extract(&event?).into_text()),
        None => Err(A2AError::NoResponse),
    }
}

/// Extract the reply from the last event of a stream
///
/// Streaming replies build the answer up over several events; the last one
/// carries the complete task.
pub async fn final_reply<S>(events: S) -> A2AResult<String>
where
    S: Stream<Item = A2AResult<ResponseEvent>>,
{
    let mut events = pin!(events);
    let mut last = None;
    while let Some(event) = events.next().await {
        last = Some(event?);
    }

    last.map(|event| extract(&event).into_text())
        .ok_or(A2AError::NoResponse)
}

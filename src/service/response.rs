//! A2A service response types

use std::fmt;

use futures::stream::BoxStream;

use crate::protocol::{agent::AgentCard, error::A2AError, event::AgentEvent};

/// Agent events decoded from a streaming response, in arrival order
pub type EventStream = BoxStream<'static, Result<AgentEvent, A2AError>>;

/// Response from an A2A service operation
pub enum A2AResponse {
    /// Agent card response (from DiscoverAgent)
    AgentCard(Box<AgentCard>),

    /// The single result of a blocking send
    Event(Box<AgentEvent>),

    /// The events of a streaming send
    Events(EventStream),
}

impl A2AResponse {
    /// Extract an agent card from the response, if present
    pub fn into_agent_card(self) -> Option<AgentCard> {
        match self {
            A2AResponse::AgentCard(card) => Some(*card),
            _ => None,
        }
    }

    /// Extract the single event of a blocking send, if present
    pub fn into_event(self) -> Option<AgentEvent> {
        match self {
            A2AResponse::Event(event) => Some(*event),
            _ => None,
        }
    }

    /// Extract the event stream of a streaming send, if present
    pub fn into_events(self) -> Option<EventStream> {
        match self {
            A2AResponse::Events(events) => Some(events),
            _ => None,
        }
    }
}

impl fmt::Debug for A2AResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            A2AResponse::AgentCard(card) => f.debug_tuple("AgentCard").field(card).finish(),
            A2AResponse::Event(event) => f.debug_tuple("Event").field(event).finish(),
            A2AResponse::Events(_) => f.debug_tuple("Events").field(&"<stream>").finish(),
        }
    }
}

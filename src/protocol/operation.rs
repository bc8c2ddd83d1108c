//! A2A protocol operations

use super::{agent::AGENT_CARD_PATH, message::Message};

/// JSON-RPC method for a blocking send
pub const SEND_MESSAGE_METHOD: &str = "message/send";

/// JSON-RPC method for a streaming send
pub const STREAM_MESSAGE_METHOD: &str = "message/stream";

/// A2A protocol operations
///
/// These are the operations a client needs to talk to a single agent:
/// discover its card, then send it messages.
#[derive(Debug, Clone)]
pub enum A2AOperation {
    /// Discover agent capabilities (fetch Agent Card)
    DiscoverAgent,

    /// Send a message to an agent
    SendMessage {
        /// The message to send
        message: Message,

        /// Whether to stream the response as server-sent events
        stream: bool,
    },
}

impl A2AOperation {
    /// Get the HTTP endpoint path for this operation
    ///
    /// JSON-RPC calls are posted to the agent URL itself, so the path is empty.
    pub fn endpoint(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => AGENT_CARD_PATH,
            A2AOperation::SendMessage { .. } => "",
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => "GET",
            A2AOperation::SendMessage { .. } => "POST",
        }
    }

    /// JSON-RPC method name, if this operation is a JSON-RPC call
    pub fn rpc_method(&self) -> Option<&'static str> {
        match self {
            A2AOperation::DiscoverAgent => None,
            A2AOperation::SendMessage { stream: false, .. } => Some(SEND_MESSAGE_METHOD),
            A2AOperation::SendMessage { stream: true, .. } => Some(STREAM_MESSAGE_METHOD),
        }
    }

    /// Check if this operation expects a streaming response
    pub fn is_streaming(&self) -> bool {
        matches!(self, A2AOperation::SendMessage { stream: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_endpoints() {
        let op = A2AOperation::SendMessage {
            message: Message::user("test"),
            stream: false,
        };
        assert_eq!(op.endpoint(), "");
        assert_eq!(op.method(), "POST");
        assert_eq!(op.rpc_method(), Some("message/send"));

        let op = A2AOperation::DiscoverAgent;
        assert_eq!(op.endpoint(), "/.well-known/agent-card.json");
        assert_eq!(op.method(), "GET");
        assert_eq!(op.rpc_method(), None);
    }

    #[test]
    fn test_operation_streaming() {
        let op = A2AOperation::SendMessage {
            message: Message::user("test"),
            stream: true,
        };
        assert!(op.is_streaming());
        assert_eq!(op.rpc_method(), Some("message/stream"));

        assert!(!A2AOperation::DiscoverAgent.is_streaming());
    }
}

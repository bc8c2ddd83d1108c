//! # AgentCore A2A
//!
//! Client shims and agent entrypoints for agents that speak the Agent2Agent
//! (A2A) protocol on an AgentCore-style runtime.
//!
//! A call resolves the agent's card, opens a runtime session, sends one
//! message over JSON-RPC and reduces the reply to a single string with the
//! [`extract`] module. The client is a Tower service stack:
//!
//! - **Validation**: rejects malformed messages, cards and events
//! - **Auth**: adds the bearer token
//! - **Session**: adds the runtime session header
//! - **Protocol**: encodes operations and drives the transport
//!
//! ## Example
//!
//! ```rust,no_run
//! use agentcore_a2a::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = RuntimeSettings::new(Some("http://127.0.0.1:9000"), Some("token"))?;
//!
//!     let reply = agentcore_a2a::invoke::send_message(&settings, "what is 101 * 11").await?;
//!     println!("{}", reply);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod entrypoint;
pub mod extract;
pub mod invoke;
pub mod layer;
pub mod protocol;
pub mod proxy;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{A2AClientBuilder, AgentClient},
        config::RuntimeSettings,
        extract::{extract, final_reply, first_reply, ResponseEvent},
        protocol::error::{A2AError, A2AResult, ConfigError},
        protocol::{
            A2AOperation, AgentCard, AgentEvent, Message, Part, Role, Task, TaskState, TaskStatus,
        },
    };
}

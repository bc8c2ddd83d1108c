//! High-level client API for A2A protocol

pub mod agent;
pub mod builder;
pub mod config;
pub mod tracker;

pub use agent::{AgentClient, ResponseEventStream};
pub use builder::{A2AClientBuilder, ClientStack};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use tracker::TaskTracker;
